use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session";

/// Server-side sessions: uuid session id -> logged-in customer email.
/// Held in the app state and injected into handlers, never ambient.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, email: &str) -> String {
        let session_id = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.clone(), email.to_string());
        session_id
    }

    pub async fn email_for(&self, session_id: &str) -> Option<String> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    pub async fn remove(&self, session_id: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_lookup_then_remove() {
        let store = SessionStore::new();

        let sid = store.create("t@x.com").await;
        assert_eq!(store.email_for(&sid).await.as_deref(), Some("t@x.com"));

        store.remove(&sid).await;
        assert_eq!(store.email_for(&sid).await, None);
    }

    #[tokio::test]
    async fn unknown_session_id_yields_nothing() {
        let store = SessionStore::new();
        assert_eq!(store.email_for("not-a-session").await, None);

        // Logging out an unknown session is a no-op.
        store.remove("not-a-session").await;
    }

    #[tokio::test]
    async fn session_ids_are_unique_per_login() {
        let store = SessionStore::new();
        let first = store.create("t@x.com").await;
        let second = store.create("t@x.com").await;
        assert_ne!(first, second);
        assert_eq!(store.email_for(&first).await.as_deref(), Some("t@x.com"));
        assert_eq!(store.email_for(&second).await.as_deref(), Some("t@x.com"));
    }
}
