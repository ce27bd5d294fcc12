//! Lovejoy Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports defined in
//! the application layer: the reqwest-backed API client and the
//! file-backed session repository, plus the connection configuration.

pub mod config;
pub mod http;
pub mod persistence;

pub use config::{ConfigError, PortalConfig};
pub use http::ReqwestApiClient;
pub use persistence::FileSessionRepository;
