//! Valkey-backed registry over a redis `MultiplexedConnection`.
//!
//! Key layout lives in `tfdeploy_common::redis_keys`. Registration uses
//! `HSETNX`; workspace append/remove are single `HSET`/`HDEL` commands;
//! variable appends rewrite one workspace field inside `WATCH`/`MULTI`/`EXEC`
//! on a dedicated connection so the watch cannot be shared with other callers.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::AsyncCommands;
use tfdeploy_common::redis_keys::fields;
use tfdeploy_common::{UserRecord, VariableDoc, WorkspaceDoc, user_key, user_workspaces_key};
use tracing::{debug, warn};

use crate::application::ports::WorkspaceRegistry;
use crate::domain::RegistryError;

/// Optimistic-lock attempts before a variable append gives up.
const MAX_WATCH_ATTEMPTS: usize = 8;

pub struct ValkeyRegistry {
    client: redis::Client,
    conn: redis::aio::MultiplexedConnection,
}

fn backend(err: &redis::RedisError) -> RegistryError {
    RegistryError::Backend(err.to_string())
}

fn decode_doc(raw: &str) -> Result<WorkspaceDoc, RegistryError> {
    serde_json::from_str(raw)
        .map_err(|e| RegistryError::Backend(format!("malformed workspace document: {e}")))
}

fn encode_doc(doc: &WorkspaceDoc) -> Result<String, RegistryError> {
    serde_json::to_string(doc)
        .map_err(|e| RegistryError::Backend(format!("failed to serialize workspace: {e}")))
}

/// Decode a workspaces hash, skipping malformed fields, oldest first.
fn collect_workspaces(raw: HashMap<String, String>) -> Vec<WorkspaceDoc> {
    let mut docs: Vec<WorkspaceDoc> = raw
        .into_iter()
        .filter_map(|(id, json)| {
            decode_doc(&json)
                .inspect_err(|e| warn!(workspace_id = %id, error = %e, "skipping malformed workspace"))
                .ok()
        })
        .collect();
    // Hash fields are unordered.
    docs.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    docs
}

impl ValkeyRegistry {
    /// Connect to Valkey and verify with PING.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or Valkey is unreachable.
    pub async fn connect(valkey_url: &str) -> Result<Self> {
        let client = redis::Client::open(valkey_url).context("invalid Valkey URL")?;
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .context("failed to connect to Valkey")?;

        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .context("Valkey startup PING failed; is Valkey reachable?")?;

        tracing::info!("Valkey registry connection ready");
        Ok(Self { client, conn })
    }

    async fn user_exists(&self, email: &str) -> Result<bool, RegistryError> {
        let mut conn = self.conn.clone();
        conn.exists(user_key(email)).await.map_err(|e| backend(&e))
    }
}

#[async_trait]
impl WorkspaceRegistry for ValkeyRegistry {
    async fn find_user(&self, email: &str) -> Result<Option<UserRecord>, RegistryError> {
        let mut conn = self.conn.clone();
        let hash: Option<String> = conn
            .hget(user_key(email), fields::PASSWORD_HASH)
            .await
            .map_err(|e| backend(&e))?;
        let Some(hash) = hash else {
            return Ok(None);
        };

        let raw: HashMap<String, String> = conn
            .hgetall(user_workspaces_key(email))
            .await
            .map_err(|e| backend(&e))?;
        let mut record = UserRecord::new(email, &hash);
        record.workspaces = collect_workspaces(raw);
        Ok(Some(record))
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<(), RegistryError> {
        let mut conn = self.conn.clone();
        let created: bool = conn
            .hset_nx(user_key(email), fields::PASSWORD_HASH, password_hash)
            .await
            .map_err(|e| backend(&e))?;
        if created {
            Ok(())
        } else {
            Err(RegistryError::UserExists(email.to_string()))
        }
    }

    async fn append_workspace(&self, email: &str, doc: WorkspaceDoc) -> Result<(), RegistryError> {
        if !self.user_exists(email).await? {
            return Err(RegistryError::UserNotFound(email.to_string()));
        }
        let json = encode_doc(&doc)?;
        let mut conn = self.conn.clone();
        conn.hset::<_, _, _, ()>(user_workspaces_key(email), &doc.id, json)
            .await
            .map_err(|e| backend(&e))
    }

    async fn remove_workspace(
        &self,
        email: &str,
        workspace_id: &str,
    ) -> Result<bool, RegistryError> {
        let mut conn = self.conn.clone();
        let removed: usize = conn
            .hdel(user_workspaces_key(email), workspace_id)
            .await
            .map_err(|e| backend(&e))?;
        Ok(removed > 0)
    }

    async fn append_variable(
        &self,
        email: &str,
        workspace_id: &str,
        variable: VariableDoc,
    ) -> Result<(), RegistryError> {
        let key = user_workspaces_key(email);
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| backend(&e))?;

        for attempt in 1..=MAX_WATCH_ATTEMPTS {
            redis::cmd("WATCH")
                .arg(&key)
                .query_async::<()>(&mut conn)
                .await
                .map_err(|e| backend(&e))?;

            let raw: Option<String> = conn
                .hget(&key, workspace_id)
                .await
                .map_err(|e| backend(&e))?;
            let Some(raw) = raw else {
                redis::cmd("UNWATCH")
                    .query_async::<()>(&mut conn)
                    .await
                    .map_err(|e| backend(&e))?;
                return Err(RegistryError::WorkspaceNotFound(workspace_id.to_string()));
            };

            let mut doc = decode_doc(&raw)?;
            doc.upsert_variable(variable.clone());
            let json = encode_doc(&doc)?;

            // EXEC replies nil when the watched key changed underneath us.
            let committed: Option<()> = redis::pipe()
                .atomic()
                .hset(&key, workspace_id, json)
                .ignore()
                .query_async(&mut conn)
                .await
                .map_err(|e| backend(&e))?;
            if committed.is_some() {
                return Ok(());
            }
            debug!(attempt, "variable append raced, retrying");
        }

        Err(RegistryError::Backend(format!(
            "variable append for '{workspace_id}' lost {MAX_WATCH_ATTEMPTS} races"
        )))
    }
}
