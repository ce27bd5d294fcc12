//! Session lifecycle ownership.

mod store;

pub use store::SessionStore;
