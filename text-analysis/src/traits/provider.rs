//! AI text-generation provider trait.

use crate::Error;
use async_trait::async_trait;

/// Abstraction over the external service that answers analysis prompts.
///
/// Implementations take a fully built prompt (instructions plus note text) and
/// return the model's raw text output. Parsing that output is not their concern.
/// Production builds use an HTTP client; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send the prompt to the provider and return its raw text answer.
    ///
    /// Errors should carry enough detail in their message for the retry classifier
    /// to tell transient failures (overload, throttling, timeouts) from permanent ones.
    async fn call(&self, prompt: &str) -> Result<String, Error>;
}
