//! API key authentication trait and implementation.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{api_key_error, ApiKeyErrorKind, Error};

/// Known API key providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyProvider {
    Gemini,
}

impl ApiKeyProvider {
    /// Get the provider identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKeyProvider::Gemini => "gemini",
        }
    }

    /// Header the provider reads the key from.
    pub fn header_name(&self) -> &'static str {
        match self {
            ApiKeyProvider::Gemini => "x-goog-api-key",
        }
    }
}

/// Trait for authenticating HTTP requests to a provider.
pub trait ProviderAuth: Send + Sync {
    /// Get the provider identifier.
    fn provider(&self) -> ApiKeyProvider;

    /// Headers to install on a client so every request is authenticated.
    ///
    /// Values are marked sensitive so they are not printed in debug output.
    fn default_headers(&self) -> Result<HeaderMap, Error>;
}

/// API key authentication implementation.
///
/// # Examples
///
/// ```rust,ignore
/// // Gemini: x-goog-api-key: xxx
/// let auth = ApiKeyAuth::new(
///     ApiKeyProvider::Gemini,
///     SecretString::new("api_key_here".to_string()),
/// );
/// ```
pub struct ApiKeyAuth {
    provider: ApiKeyProvider,
    api_key: SecretString,
}

impl ApiKeyAuth {
    /// Create a new API key authenticator using the provider's own header.
    pub fn new(provider: ApiKeyProvider, api_key: SecretString) -> Self {
        Self { provider, api_key }
    }
}

impl ProviderAuth for ApiKeyAuth {
    fn provider(&self) -> ApiKeyProvider {
        self.provider
    }

    fn default_headers(&self) -> Result<HeaderMap, Error> {
        let mut value = HeaderValue::from_str(self.api_key.expose_secret()).map_err(|_| {
            api_key_error(
                ApiKeyErrorKind::InvalidFormat,
                "API key contains characters not allowed in a header",
            )
        })?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(self.provider.header_name()), value);
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn gemini_auth(key: &str) -> ApiKeyAuth {
        ApiKeyAuth::new(ApiKeyProvider::Gemini, SecretString::new(key.to_string()))
    }

    #[test]
    fn test_api_key_provider_as_str() {
        assert_eq!(ApiKeyProvider::Gemini.as_str(), "gemini");
        assert_eq!(ApiKeyProvider::Gemini.header_name(), "x-goog-api-key");
    }

    #[test]
    fn test_gemini_auth_reports_provider() {
        assert_eq!(gemini_auth("test_key").provider(), ApiKeyProvider::Gemini);
    }

    #[test]
    fn test_default_headers_are_sensitive() {
        let headers = gemini_auth("test_key").default_headers().unwrap();
        let value = headers.get("x-goog-api-key").unwrap();

        assert_eq!(value.to_str().unwrap(), "test_key");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_default_headers_reject_invalid_key() {
        let err = gemini_auth("bad\nkey").default_headers().unwrap_err();
        assert_eq!(
            err.error_kind,
            ErrorKind::ApiKey(ApiKeyErrorKind::InvalidFormat)
        );
    }
}
