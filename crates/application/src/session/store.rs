//! The session store.
//!
//! Owns the [`SessionState`] for the lifetime of the process and is the
//! sole writer of both the in-memory session and the durable copy. Every
//! operation that touches the backend suspends exactly once, at the
//! outbound call; there are no retries and no detached workers.
//!
//! Concurrent `update_profile`/`refresh_profile` calls are not serialized
//! against each other: whichever resolves last wins the in-memory record,
//! matching the portal's observed behavior.

use std::sync::Arc;

use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use lovejoy_domain::{Provider, ProviderPatch, Session, SessionState};

use crate::api::PortalApi;
use crate::error::{PortalError, PortalResult};
use crate::ports::{ApiClient, SessionRepository};

/// The application's session store.
///
/// Constructed once at startup and shared by reference; consumers observe
/// state transitions through [`SessionStore::subscribe`] and never touch
/// durable storage directly.
pub struct SessionStore<C, R> {
    api: PortalApi<C>,
    repository: R,
    state: Arc<RwLock<SessionState>>,
    events: watch::Sender<SessionState>,
}

impl<C: ApiClient, R: SessionRepository> SessionStore<C, R> {
    /// Creates a store over an API client and a session repository.
    ///
    /// The store starts `Unauthenticated`; call [`Self::initialize`] to
    /// rehydrate a persisted session.
    #[must_use]
    pub fn new(client: C, repository: R) -> Self {
        let (events, _) = watch::channel(SessionState::Unauthenticated);
        Self {
            api: PortalApi::new(client),
            repository,
            state: Arc::new(RwLock::new(SessionState::Unauthenticated)),
            events,
        }
    }

    /// Current state snapshot.
    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// True when a session exists, stale or not.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    /// The current provider record, if a session exists.
    pub async fn provider(&self) -> Option<Provider> {
        self.state
            .read()
            .await
            .session()
            .map(|s| s.provider().clone())
    }

    /// Observes state transitions. The receiver always holds the latest
    /// state; intermediate transitions may be coalesced.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.events.subscribe()
    }

    /// Rehydrates a persisted session, then opportunistically refreshes it.
    ///
    /// A found pair makes the store `Authenticated` immediately; the
    /// follow-up profile fetch replaces the record on success and is
    /// ignored on failure, so a network blip at startup never logs the
    /// user out. Unreadable storage is treated as no session.
    pub async fn initialize(&self) {
        let persisted = match self.repository.load().await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "could not read persisted session, starting signed out");
                None
            }
        };

        let Some(session) = persisted else {
            self.set_state(SessionState::Unauthenticated).await;
            return;
        };

        info!(provider_id = session.provider().id, "session rehydrated");
        self.set_state(SessionState::Authenticated(session)).await;

        if let Err(e) = self.refresh_profile().await {
            debug!(error = %e, "startup profile refresh failed, keeping cached record");
        }
    }

    /// Authenticates and persists the resulting session.
    ///
    /// The session is written to durable storage before this resolves, so
    /// a restart immediately after login rehydrates correctly.
    ///
    /// # Errors
    ///
    /// [`PortalError::Rejected`] with the backend's message on bad
    /// credentials, any transport failure, or a storage failure while
    /// persisting. The store is `Unauthenticated` after any failure.
    pub async fn login(&self, email: &str, password: &str) -> PortalResult<Session> {
        self.set_state(SessionState::Authenticating).await;

        let session = match self.api.login(email, password).await {
            Ok(session) => session,
            Err(e) => {
                self.set_state(SessionState::Unauthenticated).await;
                return Err(e);
            }
        };

        if let Err(e) = self.repository.save(&session).await {
            self.set_state(SessionState::Unauthenticated).await;
            return Err(e.into());
        }

        info!(provider_id = session.provider().id, "logged in");
        self.set_state(SessionState::Authenticated(session.clone()))
            .await;
        Ok(session)
    }

    /// Ends the session.
    ///
    /// The backend is notified best-effort: a failed notification is
    /// logged and swallowed. Local state and durable storage are cleared
    /// unconditionally.
    ///
    /// # Errors
    ///
    /// Only a storage failure while clearing; the in-memory session is
    /// gone regardless.
    pub async fn logout(&self) -> PortalResult<()> {
        let token = self.state.read().await.token().map(String::from);

        if let Some(token) = token {
            if let Err(e) = self.api.logout(&token).await {
                warn!(error = %e, "backend logout notification failed");
            }
        }

        self.set_state(SessionState::Unauthenticated).await;
        info!("logged out");
        self.repository.clear().await?;
        Ok(())
    }

    /// Applies a partial profile update.
    ///
    /// On success the returned fields are shallow-merged into the current
    /// record (returned fields win, everything else untouched) and the
    /// session is re-persisted. On failure the previous record is intact.
    ///
    /// # Errors
    ///
    /// [`PortalError::NotAuthenticated`] without a session (no network
    /// call is made), rejection, transport, or storage failures.
    pub async fn update_profile(&self, patch: ProviderPatch) -> PortalResult<Provider> {
        let token = self
            .state
            .read()
            .await
            .token()
            .map(String::from)
            .ok_or(PortalError::NotAuthenticated)?;

        let returned = self.api.update_profile(&patch, &token).await?;

        let merged = {
            let mut state = self.state.write().await;
            match &mut *state {
                SessionState::Authenticated(session) | SessionState::Refreshing(session) => {
                    let mut provider = session.provider().clone();
                    provider.apply(returned);
                    let merged = session.clone().with_provider(provider);
                    *session = merged.clone();
                    merged
                }
                // Logged out while the update was in flight; the response
                // no longer has a session to land on.
                SessionState::Unauthenticated | SessionState::Authenticating => {
                    return Err(PortalError::NotAuthenticated);
                }
            }
        };

        self.publish().await;
        self.repository.save(&merged).await?;
        Ok(merged.provider().clone())
    }

    /// Re-fetches the full provider record and replaces the held one
    /// wholesale (replace, not merge), re-persisting on success.
    ///
    /// No-op without a token: no error, no network call.
    ///
    /// # Errors
    ///
    /// Rejection, transport, or storage failures. The stale record is
    /// retained on failure.
    pub async fn refresh_profile(&self) -> PortalResult<()> {
        let token = {
            let mut state = self.state.write().await;
            match &*state {
                SessionState::Authenticated(session) => {
                    let session = session.clone();
                    let token = session.token().to_string();
                    *state = SessionState::Refreshing(session);
                    token
                }
                SessionState::Refreshing(session) => session.token().to_string(),
                SessionState::Unauthenticated | SessionState::Authenticating => return Ok(()),
            }
        };
        self.publish().await;

        let result = self.api.fetch_profile(&token).await;

        let outcome = {
            let mut state = self.state.write().await;
            match (&mut *state, result) {
                (
                    SessionState::Refreshing(session) | SessionState::Authenticated(session),
                    Ok(fresh),
                ) => {
                    let replaced = session.clone().with_provider(fresh);
                    *state = SessionState::Authenticated(replaced.clone());
                    Ok(Some(replaced))
                }
                (SessionState::Refreshing(session), Err(e)) => {
                    // Stale-but-present beats signed-out on a transient blip.
                    let stale = session.clone();
                    *state = SessionState::Authenticated(stale);
                    Err(e)
                }
                (_, Err(e)) => Err(e),
                // Logged out while the fetch was in flight; drop the result.
                (SessionState::Unauthenticated | SessionState::Authenticating, Ok(_)) => Ok(None),
            }
        };
        self.publish().await;

        match outcome {
            Ok(Some(replaced)) => {
                self.repository.save(&replaced).await?;
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn set_state(&self, new_state: SessionState) {
        *self.state.write().await = new_state.clone();
        self.events.send_replace(new_state);
    }

    async fn publish(&self) {
        let snapshot = self.state.read().await.clone();
        self.events.send_replace(snapshot);
    }
}
