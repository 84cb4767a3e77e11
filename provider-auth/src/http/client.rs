//! Authenticated HTTP client builder.

use std::time::Duration;

use crate::api_key::ProviderAuth;
use crate::Error;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("provider-auth/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for creating authenticated HTTP clients.
///
/// The provider's credentials are installed as default headers, so every request
/// sent through the built client is authenticated. Retrying is left to the caller.
pub struct AuthenticatedClientBuilder {
    config: HttpClientConfig,
    auth: Option<Box<dyn ProviderAuth>>,
}

impl AuthenticatedClientBuilder {
    /// Create a new client builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: HttpClientConfig::default(),
            auth: None,
        }
    }

    /// Set the authentication provider.
    pub fn with_auth(mut self, auth: Box<dyn ProviderAuth>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.config.user_agent = user_agent;
        self
    }

    /// Build the configured HTTP client.
    pub fn build(self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent);

        if let Some(auth) = &self.auth {
            tracing::debug!(
                provider = auth.provider().as_str(),
                "Installing provider authentication headers"
            );
            builder = builder.default_headers(auth.default_headers()?);
        }

        Ok(builder.build()?)
    }
}

impl Default for AuthenticatedClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_key::{ApiKeyAuth, ApiKeyProvider};
    use crate::error::{ApiKeyErrorKind, ErrorKind};
    use secrecy::SecretString;

    fn gemini_auth(key: &str) -> Box<dyn ProviderAuth> {
        Box::new(ApiKeyAuth::new(
            ApiKeyProvider::Gemini,
            SecretString::new(key.to_string()),
        ))
    }

    #[test]
    fn test_builder_default() {
        let builder = AuthenticatedClientBuilder::new();
        assert_eq!(builder.config.timeout, Duration::from_secs(30));
        assert!(builder.config.user_agent.starts_with("provider-auth/"));
        assert!(builder.auth.is_none());
    }

    #[test]
    fn test_builder_with_timeout() {
        let builder = AuthenticatedClientBuilder::new().with_timeout(Duration::from_secs(60));
        assert_eq!(builder.config.timeout, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_build_client() {
        let result = AuthenticatedClientBuilder::new()
            .with_auth(gemini_auth("test_key"))
            .build();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_build_fails_for_invalid_key() {
        let err = AuthenticatedClientBuilder::new()
            .with_auth(gemini_auth("bad\nkey"))
            .build()
            .unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::ApiKey(ApiKeyErrorKind::InvalidFormat)
        );
    }

    #[tokio::test]
    async fn test_client_sends_auth_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ping")
            .match_header("x-goog-api-key", "test_key")
            .match_header("user-agent", "notes-test/1.0")
            .with_status(200)
            .create_async()
            .await;

        let client = AuthenticatedClientBuilder::new()
            .with_auth(gemini_auth("test_key"))
            .with_user_agent("notes-test/1.0".to_string())
            .build()
            .unwrap();
        let response = client
            .get(format!("{}/ping", server.url()))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        mock.assert_async().await;
    }
}
