//! Shared types for text analysis.

pub mod analysis;
pub mod config;
