//! Read-only provider configuration shared by every analysis.

use secrecy::{ExposeSecret, SecretString};

use crate::prompts::PromptTemplates;

/// Key value shipped in sample environment files. Treated the same as no key at all.
pub const PLACEHOLDER_API_KEY: &str = "your_gemini_api_key_here";

/// Generation parameters sent with every provider request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParameters {
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            max_output_tokens: 2048,
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
        }
    }
}

/// Provider settings loaded once at startup and never mutated.
///
/// The API key is stored with surrounding whitespace removed.
///
/// Whether a usable API key is present is the only thing that decides if a request
/// goes to the provider or straight to the local analyzer.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    api_key: Option<SecretString>,
    pub parameters: ModelParameters,
    pub templates: PromptTemplates,
}

impl ProviderConfig {
    pub fn new(
        api_key: Option<String>,
        parameters: ModelParameters,
        templates: PromptTemplates,
    ) -> Self {
        Self {
            api_key: api_key.map(|key| SecretString::new(key.trim().to_string())),
            parameters,
            templates,
        }
    }

    /// Configuration with no API key, which routes every request to the fallback analyzer.
    pub fn unconfigured() -> Self {
        Self::new(None, ModelParameters::default(), PromptTemplates::default())
    }

    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref()
    }

    /// True when a non-empty key other than the sample placeholder is present.
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_ref()
            .map(|key| {
                let key = key.expose_secret();
                !key.is_empty() && key != PLACEHOLDER_API_KEY
            })
            .unwrap_or(false)
    }
}
