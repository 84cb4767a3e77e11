//! API key authentication for AI providers.
//!
//! Provides a trait and an implementation for authenticating requests to services
//! that take a static API key in a request header.

mod auth;

pub use auth::{ApiKeyAuth, ApiKeyProvider, ProviderAuth};
