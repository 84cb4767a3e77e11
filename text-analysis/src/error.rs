//! Error types for text analysis provider calls.

use std::fmt;

/// Universal error type that abstracts provider-specific failures into common variants.
///
/// Provider implementations map their native errors (HTTP status codes, transport
/// failures, undecodable payloads) onto these variants. The `Display` output is what
/// the message-based retry classifier inspects, so transient variants keep the
/// markers it looks for ("503", "overloaded", "rate limit", "timeout") in their text.
#[derive(Debug)]
pub enum Error {
    /// API key rejected or lacking permission. Never retried.
    Authentication(String),

    /// Connection refused, DNS failure or a dropped connection.
    Network(String),

    /// The request exceeded the configured HTTP timeout.
    Timeout(String),

    /// The provider throttled the request.
    RateLimited(String),

    /// Any other non-success answer from the provider, with its HTTP status.
    Provider { status: u16, message: String },

    /// The provider answered successfully but the body could not be used.
    InvalidResponse(String),

    /// Invalid parameters or malformed configuration detected before calling out.
    Configuration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            Error::RateLimited(msg) => write!(f, "Provider rate limit exceeded: {}", msg),
            Error::Provider { status, message } => {
                write!(f, "Provider error ({}): {}", status, message)
            }
            Error::InvalidResponse(msg) => write!(f, "Invalid provider response: {}", msg),
            Error::Configuration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_status_code() {
        let err = Error::Provider {
            status: 503,
            message: "The model is overloaded. Please try again later.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Provider error (503): The model is overloaded. Please try again later."
        );
    }

    #[test]
    fn test_display_transient_variants_are_lowercase_markers() {
        assert!(Error::Timeout("30s elapsed".to_string())
            .to_string()
            .contains("timeout"));
        assert!(Error::RateLimited("quota".to_string())
            .to_string()
            .contains("rate limit"));
    }
}
