//! End-to-end session lifecycle over the real file repository.
//!
//! Drives the session store against a scripted in-process backend and the
//! file-backed repository, covering what a browser reload covers in the
//! hosted portal: login, restart, rehydrate, refresh, logout.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tempfile::TempDir;

use lovejoy_application::ports::{ApiClient, ApiError};
use lovejoy_application::SessionStore;
use lovejoy_infrastructure::FileSessionRepository;

/// Scripted backend: pops one canned reply per call.
#[derive(Default)]
struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<Value, ApiError>>>,
}

impl ScriptedBackend {
    fn with_replies(replies: Vec<Result<Value, ApiError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ApiClient for ScriptedBackend {
    async fn get(&self, _path: &str, _token: Option<&str>) -> Result<Value, ApiError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted backend call")
    }

    async fn post(
        &self,
        _path: &str,
        _body: &Value,
        _token: Option<&str>,
    ) -> Result<Value, ApiError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted backend call")
    }
}

fn login_reply(bio: &str) -> Value {
    serde_json::json!({
        "success": true,
        "message": "ok",
        "data": {
            "token": "T1",
            "id": 7,
            "first_name": "Amara",
            "last_name": "Okafor",
            "email": "a@b.com",
            "mobile": "1",
            "bio": bio
        }
    })
}

fn profile_reply(bio: &str) -> Value {
    serde_json::json!({
        "success": true,
        "message": "ok",
        "data": {
            "id": 7,
            "first_name": "Amara",
            "last_name": "Okafor",
            "email": "a@b.com",
            "mobile": "1",
            "bio": bio
        }
    })
}

#[tokio::test]
async fn session_survives_a_restart() {
    let tmp = TempDir::new().unwrap();

    // First process: log in.
    {
        let backend = ScriptedBackend::with_replies(vec![Ok(login_reply("from login"))]);
        let store = SessionStore::new(
            backend,
            FileSessionRepository::new(tmp.path().to_path_buf()),
        );
        store.login("a@b.com", "secret").await.unwrap();
        assert!(store.is_authenticated().await);
    }

    // Second process: rehydrate, refresh succeeds with fresher data.
    let backend = ScriptedBackend::with_replies(vec![Ok(profile_reply("from refresh"))]);
    let store = SessionStore::new(
        backend,
        FileSessionRepository::new(tmp.path().to_path_buf()),
    );
    store.initialize().await;

    assert!(store.is_authenticated().await);
    let provider = store.provider().await.unwrap();
    assert_eq!(provider.bio.as_deref(), Some("from refresh"));
    assert_eq!(store.state().await.token(), Some("T1"));
}

#[tokio::test]
async fn offline_restart_keeps_the_cached_profile() {
    let tmp = TempDir::new().unwrap();

    {
        let backend = ScriptedBackend::with_replies(vec![Ok(login_reply("cached"))]);
        let store = SessionStore::new(
            backend,
            FileSessionRepository::new(tmp.path().to_path_buf()),
        );
        store.login("a@b.com", "secret").await.unwrap();
    }

    let backend =
        ScriptedBackend::with_replies(vec![Err(ApiError::Network("offline".to_string()))]);
    let store = SessionStore::new(
        backend,
        FileSessionRepository::new(tmp.path().to_path_buf()),
    );
    store.initialize().await;

    assert!(store.is_authenticated().await);
    assert_eq!(
        store.provider().await.unwrap().bio.as_deref(),
        Some("cached")
    );
}

#[tokio::test]
async fn logout_leaves_nothing_for_the_next_start() {
    let tmp = TempDir::new().unwrap();

    {
        let backend = ScriptedBackend::with_replies(vec![
            Ok(login_reply("cached")),
            // Backend logout notification fails; local clear must not care.
            Err(ApiError::Timeout { timeout_ms: 10_000 }),
        ]);
        let store = SessionStore::new(
            backend,
            FileSessionRepository::new(tmp.path().to_path_buf()),
        );
        store.login("a@b.com", "secret").await.unwrap();
        store.logout().await.unwrap();
        assert!(!store.is_authenticated().await);
    }

    let backend = ScriptedBackend::with_replies(vec![]);
    let store = SessionStore::new(
        backend,
        FileSessionRepository::new(tmp.path().to_path_buf()),
    );
    store.initialize().await;
    assert!(!store.is_authenticated().await);
}
