//! Entry point that picks between the provider and the fallback analyzer.

use std::sync::Arc;

use log::*;

use crate::classifier::{ErrorClassifier, MessageClassifier};
use crate::retry::RetryPolicy;
use crate::traits::provider::Provider;
use crate::types::analysis::{AnalysisRequest, AnalysisResult, AnalysisType};
use crate::types::config::ProviderConfig;
use crate::{fallback, parser, Error};

/// Warning attached to a fallback result produced after the provider failed.
pub const DEGRADED_ANALYSIS_MESSAGE: &str =
    "AI service temporarily unavailable. Showing basic analysis.";

/// Produces an [`AnalysisResult`] for any text, whatever state the provider is in.
///
/// - No usable API key: the fallback analyzer answers and `error` stays unset.
/// - Provider answers: its text is parsed into the result.
/// - Provider fails for good (permanent error or retries exhausted): the fallback
///   analyzer answers and `error` carries a generic warning. The provider's own
///   error is logged but never copied into the result.
///
/// Holds no mutable state, so one instance can serve any number of concurrent calls.
pub struct Orchestrator {
    config: Arc<ProviderConfig>,
    provider: Arc<dyn Provider>,
    retry_policy: RetryPolicy,
    classifier: Box<dyn ErrorClassifier<Error>>,
}

impl Orchestrator {
    /// Create an orchestrator with the default retry policy and message-based classifier.
    pub fn new(config: Arc<ProviderConfig>, provider: Arc<dyn Provider>) -> Self {
        Self {
            config,
            provider,
            retry_policy: RetryPolicy::default(),
            classifier: Box::new(MessageClassifier::default()),
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn with_classifier(mut self, classifier: Box<dyn ErrorClassifier<Error>>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Analyze `text` using the prompt mode `analysis_type`.
    pub async fn analyze(&self, text: &str, analysis_type: AnalysisType) -> AnalysisResult {
        if !self.config.is_configured() {
            warn!("Provider API key not configured, using fallback analysis");
            return fallback::analyze(text);
        }

        let prompt = self.config.templates.build_prompt(analysis_type, text);
        debug!(
            "Requesting {} analysis for {} characters of text",
            analysis_type,
            text.chars().count()
        );

        let provider = self.provider.as_ref();
        let prompt = prompt.as_str();
        let outcome = self
            .retry_policy
            .run(self.classifier.as_ref(), move || provider.call(prompt))
            .await;

        match outcome {
            Ok(raw) => {
                debug!("Provider answered with {} bytes", raw.len());
                parser::parse(&raw)
            }
            Err(err) => {
                error!("AI analysis failed, using fallback: {}", err);
                let mut result = fallback::analyze(text);
                result.error = Some(DEGRADED_ANALYSIS_MESSAGE.to_string());
                result
            }
        }
    }

    pub async fn analyze_request(&self, request: &AnalysisRequest) -> AnalysisResult {
        self.analyze(&request.text, request.analysis_type).await
    }
}
