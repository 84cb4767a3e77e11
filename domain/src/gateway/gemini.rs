//! Gemini API client for text analysis.
//!
//! Sends a single prompt to the `generateContent` endpoint and returns the text of the
//! first candidate. HTTP and transport failures are mapped onto
//! [`text_analysis::Error`] so the retry classifiers can judge them.

use std::time::Duration;

use async_trait::async_trait;
use log::*;
use provider_auth::api_key::{ApiKeyAuth, ApiKeyProvider};
use provider_auth::http::AuthenticatedClientBuilder;
use reqwest::StatusCode;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use text_analysis::traits::provider::Provider;
use text_analysis::{Error as AnalysisError, ModelParameters};

use crate::error::{config_error, Error};

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

/// Sampling settings sent with every request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

/// Successful response from `generateContent`
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

/// Error envelope returned with non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl GenerateContentRequest {
    pub fn new(prompt: &str, parameters: &ModelParameters) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: parameters.temperature,
                top_k: parameters.top_k,
                top_p: parameters.top_p,
                max_output_tokens: parameters.max_output_tokens,
            },
        }
    }
}

impl GenerateContentResponse {
    /// Text of the first candidate, with all of its text parts joined.
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let texts: Vec<&str> = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

/// Gemini API client
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    parameters: ModelParameters,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key and base URL
    pub fn new(
        api_key: SecretString,
        base_url: &str,
        parameters: ModelParameters,
        timeout: Duration,
    ) -> Result<Self, Error> {
        reqwest::Url::parse(base_url).map_err(|e| {
            warn!("Invalid Gemini base URL {}: {:?}", base_url, e);
            config_error("Invalid Gemini base URL")
        })?;
        if parameters.model.trim().is_empty() {
            return Err(config_error("Gemini model name must not be empty"));
        }

        let client = AuthenticatedClientBuilder::new()
            .with_auth(Box::new(ApiKeyAuth::new(ApiKeyProvider::Gemini, api_key)))
            .with_timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            parameters,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.parameters.model
        )
    }

    /// Generate content for a single prompt
    pub async fn generate_content(&self, prompt: &str) -> Result<String, AnalysisError> {
        let request = GenerateContentRequest::new(prompt, &self.parameters);

        debug!(
            "Sending {} character prompt to Gemini model {}",
            prompt.chars().count(),
            self.parameters.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to call Gemini: {:?}", e);
                transport_error(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!("Failed to read Gemini response body: {:?}", e);
            transport_error(e)
        })?;

        if !status.is_success() {
            let message = error_message(status, &body);
            error!("Gemini API ({}): {}", status.as_u16(), message);
            return Err(status_error(status, message));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse Gemini response: {:?}", e);
            AnalysisError::InvalidResponse(format!("Undecodable response body: {}", e))
        })?;

        parsed.first_text().ok_or_else(|| {
            warn!("Gemini response contained no candidate text");
            AnalysisError::InvalidResponse("No candidate text in response".to_string())
        })
    }
}

#[async_trait]
impl Provider for GeminiClient {
    async fn call(&self, prompt: &str) -> Result<String, AnalysisError> {
        self.generate_content(prompt).await
    }
}

fn transport_error(err: reqwest::Error) -> AnalysisError {
    if err.is_timeout() {
        AnalysisError::Timeout(err.to_string())
    } else {
        AnalysisError::Network(err.to_string())
    }
}

/// Message from the error envelope, falling back to the raw body or the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    }
}

fn status_error(status: StatusCode, message: String) -> AnalysisError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AnalysisError::Authentication(message),
        StatusCode::TOO_MANY_REQUESTS => AnalysisError::RateLimited(message),
        _ => AnalysisError::Provider {
            status: status.as_u16(),
            message,
        },
    }
}
