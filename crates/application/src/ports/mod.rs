//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external
//! systems. Each port is a trait implemented by an adapter in the
//! infrastructure layer (or by a fake in tests).

mod api_client;
mod session_repository;

pub use api_client::{ApiClient, ApiError};
pub use session_repository::{SessionRepository, StorageError};
