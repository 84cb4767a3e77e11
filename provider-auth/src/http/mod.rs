//! HTTP client building.

mod client;

pub use client::{AuthenticatedClientBuilder, HttpClientConfig};
