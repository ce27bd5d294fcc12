//! Lovejoy Domain - Core types for the provider portal client
//!
//! This crate defines the domain model shared by the portal client: the
//! provider record, the session lifecycle, and the backend response
//! envelope. All types here are pure Rust with no I/O dependencies.

pub mod envelope;
pub mod provider;
pub mod session;

pub use envelope::{Envelope, Rejection};
pub use provider::{Provider, ProviderPatch};
pub use session::{Session, SessionState};
