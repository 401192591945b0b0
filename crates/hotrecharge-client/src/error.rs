//! Client error types.

use hotrecharge_core::{ErrorKind, HotRechargeError, IdError};

/// Errors that can occur when using the Hot Recharge client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service, or the transport to it, reported a failure.
    #[error("Hot Recharge error: {0}")]
    Remote(#[from] HotRechargeError),

    /// The request was rejected locally before anything was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A caller-supplied agent reference is not acceptable.
    #[error("invalid reference: {0}")]
    InvalidReference(#[from] IdError),

    /// A successful reply did not match the expected response shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// The classified error kind, for [`ClientError::Remote`] errors.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Remote(err) => Some(err.kind()),
            _ => None,
        }
    }
}
