//! Caller-facing text analysis wired from the service configuration.

use std::sync::Arc;

use async_trait::async_trait;
use log::*;
use service::config::{Config, RetryClassifier};
use text_analysis::classifier::{ErrorClassifier, KindClassifier, MessageClassifier};
use text_analysis::prompts::PromptTemplates;
use text_analysis::retry::RetryPolicy;
use text_analysis::traits::provider::Provider;
use text_analysis::{
    AnalysisResult, AnalysisType, Error as AnalysisError, ModelParameters, Orchestrator,
    ProviderConfig,
};
use tokio_util::sync::CancellationToken;

use crate::error::Error;
use crate::gateway::gemini::GeminiClient;

/// Stands in for the provider when no usable key is configured. The orchestrator
/// routes every request to the fallback analyzer first, so this is never called.
struct UnconfiguredProvider;

#[async_trait]
impl Provider for UnconfiguredProvider {
    async fn call(&self, _prompt: &str) -> Result<String, AnalysisError> {
        Err(AnalysisError::Configuration(
            "Gemini API key not configured".to_string(),
        ))
    }
}

/// Analyzes note text with Gemini, retrying transient failures and falling back to
/// local analysis whenever the provider cannot help.
pub struct TextAnalysisService {
    orchestrator: Orchestrator,
}

impl TextAnalysisService {
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::build(config, None)
    }

    /// Like [`TextAnalysisService::from_config`], but pending retries stop once `token`
    /// is cancelled.
    pub fn from_config_with_cancellation(
        config: &Config,
        token: CancellationToken,
    ) -> Result<Self, Error> {
        Self::build(config, Some(token))
    }

    fn build(config: &Config, cancellation: Option<CancellationToken>) -> Result<Self, Error> {
        let provider_config = Arc::new(provider_config(config));

        let provider: Arc<dyn Provider> = match provider_config.api_key() {
            Some(api_key) if provider_config.is_configured() => {
                info!(
                    "Using Gemini model {} at {}",
                    provider_config.parameters.model,
                    config.gemini_base_url()
                );
                Arc::new(GeminiClient::new(
                    api_key.clone(),
                    config.gemini_base_url(),
                    provider_config.parameters.clone(),
                    config.provider_timeout(),
                )?)
            }
            _ => {
                warn!("Gemini API key not configured, notes will get basic analysis only");
                Arc::new(UnconfiguredProvider)
            }
        };

        let mut policy = retry_policy(config);
        if let Some(token) = cancellation {
            policy = policy.with_cancellation(token);
        }
        debug!(
            "Analysis retry policy: {:?}, classifier: {}",
            policy, config.retry_classifier
        );

        let orchestrator = Orchestrator::new(provider_config, provider)
            .with_retry_policy(policy)
            .with_classifier(classifier(config.retry_classifier));

        Ok(Self { orchestrator })
    }

    /// Analyze `text`. Always produces a result; see [`AnalysisResult::is_fallback`] and
    /// [`AnalysisResult::error`] for how it was obtained.
    pub async fn analyze_text(&self, text: &str, analysis_type: AnalysisType) -> AnalysisResult {
        self.orchestrator.analyze(text, analysis_type).await
    }
}

fn provider_config(config: &Config) -> ProviderConfig {
    let parameters = ModelParameters {
        model: config.gemini_model.clone(),
        max_output_tokens: config.gemini_max_output_tokens,
        temperature: config.gemini_temperature,
        top_k: config.gemini_top_k,
        top_p: config.gemini_top_p,
    };
    ProviderConfig::new(
        config.gemini_api_key(),
        parameters,
        PromptTemplates::default(),
    )
}

fn retry_policy(config: &Config) -> RetryPolicy {
    RetryPolicy::new(config.analysis_max_attempts, config.analysis_base_delay())
        .with_max_jitter(config.analysis_max_jitter())
}

fn classifier(kind: RetryClassifier) -> Box<dyn ErrorClassifier<AnalysisError>> {
    match kind {
        RetryClassifier::Message => Box::new(MessageClassifier::default()),
        RetryClassifier::Kind => Box::new(KindClassifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, InternalErrorKind};
    use clap::Parser;
    use text_analysis::orchestrator::DEGRADED_ANALYSIS_MESSAGE;
    use text_analysis::types::config::PLACEHOLDER_API_KEY;

    const ENDPOINT: &str = "/v1beta/models/gemini-2.0-flash:generateContent";
    const NOTE: &str = "This is a meeting to discuss tasks.";

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: Config,
    }

    /// Fast retries so tests never wait on real backoff.
    fn config(api_key: Option<&str>, base_url: &str, extra: &[&str]) -> Config {
        let args = [
            "test",
            "--analysis-base-delay-ms",
            "1",
            "--analysis-max-jitter-ms",
            "0",
        ];
        TestCli::try_parse_from(args.iter().chain(extra.iter()).copied())
            .unwrap()
            .config
            .set_gemini_api_key(api_key.map(str::to_string))
            .set_gemini_base_url(base_url.to_string())
    }

    fn gemini_answer(text: &str) -> String {
        serde_json::json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
            .to_string()
    }

    #[tokio::test]
    async fn test_without_key_gives_fallback_without_warning() {
        let service =
            TextAnalysisService::from_config(&config(None, "http://127.0.0.1:1", &[])).unwrap();

        let result = service.analyze_text(NOTE, AnalysisType::General).await;

        assert!(result.is_fallback);
        assert_eq!(result.error, None);
        assert_eq!(result.tags[0], "meeting");
    }

    #[tokio::test]
    async fn test_placeholder_key_gives_fallback_without_warning() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", ENDPOINT).expect(0).create_async().await;
        let service = TextAnalysisService::from_config(&config(
            Some(PLACEHOLDER_API_KEY),
            &server.url(),
            &[],
        ))
        .unwrap();

        let result = service.analyze_text(NOTE, AnalysisType::Keywords).await;

        assert!(result.is_fallback);
        assert_eq!(result.error, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_provider_answer_is_parsed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", ENDPOINT)
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_body(gemini_answer(
                "Summary: Planning meeting.\nSuggested Tags: meeting, planning\n\
                 Key Terms: roadmap\nGrammar Check: No issues.",
            ))
            .create_async()
            .await;
        let service =
            TextAnalysisService::from_config(&config(Some("test-key"), &server.url(), &[]))
                .unwrap();

        let result = service.analyze_text(NOTE, AnalysisType::General).await;

        assert!(!result.is_fallback);
        assert_eq!(result.summary, "Planning meeting.");
        assert_eq!(result.tags, vec!["meeting", "planning"]);
        assert_eq!(result.key_terms, vec!["roadmap"]);
        assert_eq!(result.grammar_check, "No issues.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_key_from_env_file_is_sent_trimmed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", ENDPOINT)
            .match_header("x-goog-api-key", "test-key")
            .with_status(200)
            .with_body(gemini_answer("Summary: Trimmed."))
            .create_async()
            .await;
        let service =
            TextAnalysisService::from_config(&config(Some("  test-key \n"), &server.url(), &[]))
                .unwrap();

        let result = service.analyze_text(NOTE, AnalysisType::General).await;

        assert!(!result.is_fallback);
        assert_eq!(result.summary, "Trimmed.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_overloaded_provider_is_retried_then_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", ENDPOINT)
            .with_status(503)
            .with_body(
                r#"{"error":{"code":503,"message":"The model is overloaded.","status":"UNAVAILABLE"}}"#,
            )
            .expect(3)
            .create_async()
            .await;
        let service =
            TextAnalysisService::from_config(&config(Some("test-key"), &server.url(), &[]))
                .unwrap();

        let result = service.analyze_text(NOTE, AnalysisType::General).await;

        assert!(result.is_fallback);
        assert_eq!(result.error.as_deref(), Some(DEGRADED_ANALYSIS_MESSAGE));
        assert!(!result.summary.contains("overloaded"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_key_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", ENDPOINT)
            .with_status(403)
            .with_body(r#"{"error":{"code":403,"message":"API key not valid.","status":"PERMISSION_DENIED"}}"#)
            .expect(1)
            .create_async()
            .await;
        let service =
            TextAnalysisService::from_config(&config(Some("test-key"), &server.url(), &[]))
                .unwrap();

        let result = service.analyze_text(NOTE, AnalysisType::General).await;

        assert!(result.is_fallback);
        assert_eq!(result.error.as_deref(), Some(DEGRADED_ANALYSIS_MESSAGE));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_kind_classifier_does_not_retry_plain_server_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", ENDPOINT)
            .with_status(500)
            .with_body("timeout while contacting backend")
            .expect(1)
            .create_async()
            .await;
        let service = TextAnalysisService::from_config(&config(
            Some("test-key"),
            &server.url(),
            &["--retry-classifier", "kind"],
        ))
        .unwrap();

        let result = service.analyze_text(NOTE, AnalysisType::General).await;

        assert!(result.is_fallback);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_max_attempts_is_configurable() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", ENDPOINT)
            .with_status(429)
            .expect(2)
            .create_async()
            .await;
        let service = TextAnalysisService::from_config(&config(
            Some("test-key"),
            &server.url(),
            &["--analysis-max-attempts", "2"],
        ))
        .unwrap();

        let result = service.analyze_text(NOTE, AnalysisType::Summary).await;

        assert!(result.is_fallback);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_retries() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", ENDPOINT)
            .with_status(503)
            .expect(1)
            .create_async()
            .await;
        let token = CancellationToken::new();
        token.cancel();
        let service = TextAnalysisService::from_config_with_cancellation(
            &config(Some("test-key"), &server.url(), &[]),
            token,
        )
        .unwrap();

        let result = service.analyze_text(NOTE, AnalysisType::General).await;

        assert!(result.is_fallback);
        assert!(result.error.is_some());
        mock.assert_async().await;
    }

    #[test]
    fn test_invalid_base_url_is_a_config_error() {
        let result = TextAnalysisService::from_config(&config(Some("test-key"), "::nope::", &[]));

        match result {
            Err(err) => assert_eq!(
                err.error_kind,
                DomainErrorKind::Internal(InternalErrorKind::Config)
            ),
            Ok(_) => panic!("expected a configuration error"),
        }
    }
}
