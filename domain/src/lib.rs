//! Note analysis for the notes assistant.
//!
//! Wires the provider-independent analysis core in `text-analysis` to the Gemini API
//! using settings from `service::config::Config`, and prepares note bodies for analysis.

pub mod analysis;
pub mod error;
pub mod gateway;
pub mod note_text;

pub use analysis::TextAnalysisService;
pub use text_analysis::{AnalysisResult, AnalysisType};
