//! Text analysis for notes, backed by an external AI provider with a local fallback.
//!
//! This crate turns arbitrary note text into a structured [`AnalysisResult`]:
//! - An [`Orchestrator`] decides between the provider and the offline analyzer
//! - A [`retry::RetryPolicy`] drives provider calls with exponential backoff and jitter
//! - A [`classifier::ErrorClassifier`] decides which provider failures are worth retrying
//! - The [`parser`] turns the provider's free-text answer into the strict result shape
//! - The [`fallback`] analyzer produces a deterministic result from the text alone
//!
//! Callers never see a provider failure as an error. Every path ends in a valid
//! `AnalysisResult`, with `is_fallback` and `error` describing how it was produced.

pub mod classifier;
pub mod error;
pub mod fallback;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod retry;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::Error;
pub use orchestrator::Orchestrator;
pub use types::analysis::{AnalysisRequest, AnalysisResult, AnalysisType};
pub use types::config::{ModelParameters, ProviderConfig};
