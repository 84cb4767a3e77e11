use clap::builder::TypedValueParser as _;
use clap::{Args, ValueEnum};
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::time::Duration;

/// Default Gemini API base URL used when `GEMINI_BASE_URL` is not set.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// How provider failures are judged retryable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RetryClassifier {
    /// Match well-known markers in the error message.
    #[default]
    Message,
    /// Decide from the structured error kind and HTTP status.
    Kind,
}

impl fmt::Display for RetryClassifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RetryClassifier::Message => write!(f, "message"),
            RetryClassifier::Kind => write!(f, "kind"),
        }
    }
}

/// Settings shared by every binary in the workspace.
///
/// Meant to be flattened into a binary's own `clap::Parser`. Call [`load_env`] before
/// parsing so values from a `.env` file are visible.
#[derive(Clone, Debug, Args)]
pub struct Config {
    /// The API key to use when calling the Gemini API. Without a real key every
    /// analysis is produced locally.
    #[arg(long, env)]
    gemini_api_key: Option<String>,

    /// The base URL of the Gemini API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_GEMINI_BASE_URL)]
    gemini_base_url: String,

    /// The Gemini model to generate content with
    #[arg(long, env, default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    /// Maximum number of tokens the model may generate per analysis
    #[arg(long, env, default_value_t = 2048)]
    pub gemini_max_output_tokens: u32,

    /// Sampling temperature
    #[arg(long, env, default_value_t = 0.7)]
    pub gemini_temperature: f32,

    /// Top-k sampling cutoff
    #[arg(long, env, default_value_t = 40)]
    pub gemini_top_k: u32,

    /// Top-p (nucleus) sampling cutoff
    #[arg(long, env, default_value_t = 0.95)]
    pub gemini_top_p: f32,

    /// Timeout in seconds for a single request to the provider
    #[arg(long, env, default_value_t = 30)]
    pub provider_timeout_secs: u64,

    /// Total number of provider attempts per analysis, including the first
    #[arg(long, env, default_value_t = 3)]
    pub analysis_max_attempts: u32,

    /// Backoff delay in milliseconds before the first retry; doubles on each retry
    #[arg(long, env, default_value_t = 1000)]
    pub analysis_base_delay_ms: u64,

    /// Upper bound in milliseconds of the random jitter added to each backoff delay
    #[arg(long, env, default_value_t = 1000)]
    pub analysis_max_jitter_ms: u64,

    /// Strategy used to decide whether a failed provider call is retried
    #[arg(long, env, value_enum, default_value_t = RetryClassifier::Message)]
    pub retry_classifier: RetryClassifier,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,
}

/// Load a `.env` file from the current directory or its parents, if there is one.
pub fn load_env() {
    dotenv().ok();
}

impl Config {
    pub fn gemini_api_key(&self) -> Option<String> {
        self.gemini_api_key.clone()
    }

    pub fn set_gemini_api_key(mut self, api_key: Option<String>) -> Self {
        self.gemini_api_key = api_key;
        self
    }

    pub fn gemini_base_url(&self) -> &str {
        self.gemini_base_url.trim_end_matches('/')
    }

    pub fn set_gemini_base_url(mut self, base_url: String) -> Self {
        self.gemini_base_url = base_url;
        self
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    pub fn analysis_base_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_base_delay_ms)
    }

    pub fn analysis_max_jitter(&self) -> Duration {
        Duration::from_millis(self.analysis_max_jitter_ms)
    }
}
