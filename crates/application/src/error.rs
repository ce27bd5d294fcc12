//! Application error types

use lovejoy_domain::Rejection;
use thiserror::Error;

use crate::ports::{ApiError, StorageError};

/// Application-level errors surfaced to callers of the session store and
/// endpoint wrappers.
#[derive(Debug, Error)]
pub enum PortalError {
    /// An operation requiring a live session was invoked without one.
    /// Raised locally, before any network call.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The backend reached a decision and said no: a 2xx response whose
    /// envelope carried `success: false`. The message is fit for display.
    #[error("{message}")]
    Rejected {
        /// The backend's message.
        message: String,
    },

    /// A transport failure from the API client.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Durable storage failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<Rejection> for PortalError {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected {
            message: rejection.message,
        }
    }
}

/// Result type alias for application operations.
pub type PortalResult<T> = Result<T, PortalError>;
