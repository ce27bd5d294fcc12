//! Session repository port
//!
//! Defines the interface for durable session persistence. The stored
//! session survives process restarts; it is the client-side analogue of
//! the browser portal's local storage keys.

use async_trait::async_trait;
use lovejoy_domain::Session;

/// Errors that can occur during session persistence.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository trait for durable session persistence.
///
/// The token and the provider record are one unit: implementations must
/// write them together and clear them together, and must never report a
/// session when only one half survives.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the persisted session, if a complete one exists.
    ///
    /// A half-present record (token without profile or vice versa) is
    /// reported as `None`, not as an error.
    ///
    /// # Errors
    ///
    /// Returns an error only for unreadable storage, not for absence.
    async fn load(&self) -> Result<Option<Session>, StorageError>;

    /// Persists the session, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    async fn save(&self, session: &Session) -> Result<(), StorageError>;

    /// Removes the persisted session. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if existing data cannot be removed.
    async fn clear(&self) -> Result<(), StorageError>;
}
