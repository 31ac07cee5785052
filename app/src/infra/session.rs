//! In-memory bearer-token sessions with a fixed TTL.
//!
//! Expired sessions are purged lazily: on lookup of that token, and in bulk
//! whenever a new session is issued.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::SessionStore;
use crate::domain::workspace::Actor;

struct Session {
    actor: Actor,
    expires_at: DateTime<Utc>,
}

pub struct MemorySessionStore {
    ttl: TimeDelta,
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn issue(&self, actor: &Actor) -> String {
        let token = Uuid::new_v4().to_string();
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(
            token.clone(),
            Session {
                actor: actor.clone(),
                expires_at: now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
            },
        );
        token
    }

    async fn resolve(&self, token: &str) -> Option<Actor> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                None => return None,
                Some(s) if s.expires_at > now => return Some(s.actor.clone()),
                Some(_) => {}
            }
        }
        self.sessions.write().await.remove(token);
        None
    }

    async fn revoke(&self, token: &str) -> bool {
        let now = Utc::now();
        self.sessions
            .write()
            .await
            .remove(token)
            .is_some_and(|s| s.expires_at > now)
    }
}
