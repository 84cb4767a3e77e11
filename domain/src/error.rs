//! Error types for the `domain` layer.
use provider_auth::error::{
    Error as ProviderAuthError, ErrorKind as ProviderAuthErrorKind, HttpErrorKind,
};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. The intent is to translate errors between layers while maintaining
/// layer boundaries. Ex. `domain` is dependent on `provider-auth`, and the binary is
/// dependent on `domain`, but the binary should not be dependent, directly, on `provider-auth`.
///
/// Analysis itself never fails; these errors only come out of startup wiring.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}
/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Config,
    Other(String),
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ProviderAuthError> for Error {
    fn from(err: ProviderAuthError) -> Self {
        let error_kind = match &err.error_kind {
            ProviderAuthErrorKind::ApiKey(_) => DomainErrorKind::Internal(InternalErrorKind::Config),
            ProviderAuthErrorKind::Http(HttpErrorKind::BuilderFailed) => DomainErrorKind::Internal(
                InternalErrorKind::Other("Failed to build reqwest client".to_string()),
            ),
            ProviderAuthErrorKind::Http(_) => DomainErrorKind::External(ExternalErrorKind::Network),
        };
        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

/// Helper for configuration values rejected while wiring services together.
pub(crate) fn config_error(message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provider_auth::error::{api_key_error, ApiKeyErrorKind};

    #[test]
    fn test_api_key_errors_translate_to_config() {
        let err: Error = api_key_error(ApiKeyErrorKind::InvalidFormat, "bad key").into();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Config)
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_keeps_message() {
        let err = config_error("Invalid Gemini base URL");
        assert_eq!(
            err.source().unwrap().to_string(),
            "Invalid Gemini base URL"
        );
    }
}
