//! Session types for the authentication lifecycle.
//!
//! A [`Session`] pairs the bearer token with the provider record it was
//! issued for. The pairing is enforced by construction: there is no way to
//! hold a token without an actor or an actor without a token, which is what
//! "authenticated" means everywhere in this client.

use serde::{Deserialize, Serialize};

use crate::provider::Provider;

/// An authenticated pairing of provider record and bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    token: String,
    provider: Provider,
}

impl Session {
    /// Creates a session from a token and the provider it belongs to.
    #[must_use]
    pub fn new(token: impl Into<String>, provider: Provider) -> Self {
        Self {
            token: token.into(),
            provider,
        }
    }

    /// The bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The provider record.
    #[must_use]
    pub const fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Replaces the provider record wholesale, keeping the token.
    #[must_use]
    pub fn with_provider(self, provider: Provider) -> Self {
        Self {
            token: self.token,
            provider,
        }
    }

    /// Splits the session into its parts.
    #[must_use]
    pub fn into_parts(self) -> (String, Provider) {
        (self.token, self.provider)
    }
}

/// The authentication lifecycle as observed by the rest of the application.
///
/// Transitions are driven exclusively by the session store:
/// - `Unauthenticated` → `Authenticating` when a login starts
/// - `Authenticating` → `Authenticated` on success, back to
///   `Unauthenticated` on failure
/// - `Authenticated` → `Refreshing` while a profile reload is in flight
///   (the held session stays readable, it is just known to be stale)
/// - any state → `Unauthenticated` on logout
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// No session; login required.
    #[default]
    Unauthenticated,
    /// A login call is in flight.
    Authenticating,
    /// A live session.
    Authenticated(Session),
    /// A profile reload is in flight; the held session may be stale.
    Refreshing(Session),
}

impl SessionState {
    /// True when a session exists, stale or not.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_) | Self::Refreshing(_))
    }

    /// The current session, if one exists.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) | Self::Refreshing(session) => Some(session),
            Self::Unauthenticated | Self::Authenticating => None,
        }
    }

    /// The current token, if a session exists.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session().map(Session::token)
    }
}
