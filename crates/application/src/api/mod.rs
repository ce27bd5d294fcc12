//! Typed backend endpoint wrappers.

mod portal;

pub use portal::{PortalApi, ProfileCheck, Registration};
