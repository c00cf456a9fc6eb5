//! Core models and credential primitives for the pitwall session layer
//!
//! Pure leaf crate: data models, wire constants, embedded-claims decoding and
//! the credential store. No network access, no async runtime.

pub mod claims;
pub mod constants;
pub mod credentials;
pub mod models;

pub use claims::{session_token_from_cookie, Claims};
pub use credentials::CredentialStore;
pub use models::*;
