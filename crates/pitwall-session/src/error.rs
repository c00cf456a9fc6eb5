//! Error types for the session layer

use thiserror::Error;

/// Failures raised by the underlying transport.
///
/// These never cross the public API boundary: every orchestration operation
/// that issues a network call absorbs its failure, logs the drop and emits
/// nothing.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Decode(String),
}
