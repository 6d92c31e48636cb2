//! Gateway error taxonomy.
//!
//! Internal helpers return `Result<_, GatewayError>` and propagate with `?`.
//! The `Display` text of each variant is exactly what the caller sees in
//! `Outcome::Failure`, so transport detail is logged rather than displayed.

use crate::storage::StorageError;

pub const NO_TOKEN_MESSAGE: &str = "No token";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error occurred";
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";
pub const STORAGE_ERROR_MESSAGE: &str = "Failed to persist session";

/// Errors produced by gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// An authenticated operation was invoked while anonymous.
    #[error("{}", NO_TOKEN_MESSAGE)]
    NoToken,

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// `GET /users/me` answered 422: the held token is no longer valid.
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,

    /// Transport failure, non-JSON body, or a body missing required fields.
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The durable store refused a write while acquiring a credential.
    #[error("{}", STORAGE_ERROR_MESSAGE)]
    Storage(#[from] StorageError),
}

impl GatewayError {
    /// Underlying detail for logs; never shown to the caller.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Network(detail) | Self::HttpClientBuild(detail) => detail.clone(),
            Self::Storage(e) => e.to_string(),
            Self::Rejected { status, message } => format!("{status}: {message}"),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}
