//! Lovejoy Application - Session and backend access layer
//!
//! This crate owns the client's systems core: the [`ports`] that bound it
//! (API client, durable session storage), the typed endpoint wrappers in
//! [`api`], and the [`session::SessionStore`] that mediates every read and
//! write of the authenticated session.

pub mod api;
pub mod error;
pub mod ports;
pub mod session;

pub use error::{PortalError, PortalResult};
pub use session::SessionStore;
