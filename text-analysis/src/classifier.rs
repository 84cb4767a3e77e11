//! Retryability decisions for failed provider calls.

use std::fmt;

use crate::Error;

/// Message fragments that mark a failure as transient.
///
/// Matching is case-sensitive and runs on the rendered error message.
pub const RETRYABLE_MARKERS: [&str; 4] = ["503", "overloaded", "rate limit", "timeout"];

/// Decides whether a failed operation is worth attempting again.
pub trait ErrorClassifier<E: ?Sized>: Send + Sync {
    fn is_retryable(&self, error: &E) -> bool;
}

/// Classifies by searching the error's `Display` output for known markers.
#[derive(Debug, Clone)]
pub struct MessageClassifier {
    markers: Vec<String>,
}

impl MessageClassifier {
    pub fn new(markers: &[&str]) -> Self {
        Self {
            markers: markers.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl Default for MessageClassifier {
    fn default() -> Self {
        Self::new(&RETRYABLE_MARKERS)
    }
}

impl<E: fmt::Display + ?Sized> ErrorClassifier<E> for MessageClassifier {
    fn is_retryable(&self, error: &E) -> bool {
        let message = error.to_string();
        self.markers
            .iter()
            .any(|marker| message.contains(marker.as_str()))
    }
}

/// Classifies by error variant instead of message text.
///
/// Timeouts, throttling, transport failures and 5xx gateway/overload statuses are
/// retried. Everything else, including a plain 500, is treated as permanent.
#[derive(Debug, Clone, Copy, Default)]
pub struct KindClassifier;

impl ErrorClassifier<Error> for KindClassifier {
    fn is_retryable(&self, error: &Error) -> bool {
        match error {
            Error::Timeout(_) | Error::RateLimited(_) | Error::Network(_) => true,
            Error::Provider { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }
}
