//! # provider-auth
//!
//! Authentication plumbing for calling external AI providers:
//! - API key authentication placed in the provider's expected header
//! - HTTP client building with timeout, user agent and credentials applied
//!
//! ## Usage
//!
//! ```rust,ignore
//! use provider_auth::{
//!     api_key::{ApiKeyAuth, ApiKeyProvider},
//!     http::AuthenticatedClientBuilder,
//! };
//!
//! let auth = ApiKeyAuth::new(ApiKeyProvider::Gemini, api_key);
//! let client = AuthenticatedClientBuilder::new()
//!     .with_auth(Box::new(auth))
//!     .build()?;
//! ```

pub mod api_key;
pub mod error;
pub mod http;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
