//! Seams for the external dependencies of the analysis core.

pub mod provider;
pub mod sleeper;
