//! In-process registry. One write lock per update keeps each update atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use tfdeploy_common::{UserRecord, VariableDoc, WorkspaceDoc};
use tokio::sync::RwLock;

use crate::application::ports::WorkspaceRegistry;
use crate::domain::RegistryError;

#[derive(Default)]
pub struct MemoryRegistry {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkspaceRegistry for MemoryRegistry {
    async fn find_user(&self, email: &str) -> Result<Option<UserRecord>, RegistryError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn create_user(&self, email: &str, password_hash: &str) -> Result<(), RegistryError> {
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(RegistryError::UserExists(email.to_string()));
        }
        users.insert(email.to_string(), UserRecord::new(email, password_hash));
        Ok(())
    }

    async fn append_workspace(&self, email: &str, doc: WorkspaceDoc) -> Result<(), RegistryError> {
        let mut users = self.users.write().await;
        let record = users
            .get_mut(email)
            .ok_or_else(|| RegistryError::UserNotFound(email.to_string()))?;
        match record.workspace_mut(&doc.id) {
            Some(existing) => *existing = doc,
            None => record.workspaces.push(doc),
        }
        Ok(())
    }

    async fn remove_workspace(
        &self,
        email: &str,
        workspace_id: &str,
    ) -> Result<bool, RegistryError> {
        let mut users = self.users.write().await;
        let Some(record) = users.get_mut(email) else {
            return Ok(false);
        };
        let before = record.workspaces.len();
        record.workspaces.retain(|w| w.id != workspace_id);
        Ok(record.workspaces.len() != before)
    }

    async fn append_variable(
        &self,
        email: &str,
        workspace_id: &str,
        variable: VariableDoc,
    ) -> Result<(), RegistryError> {
        let mut users = self.users.write().await;
        let workspace = users
            .get_mut(email)
            .and_then(|record| record.workspace_mut(workspace_id))
            .ok_or_else(|| RegistryError::WorkspaceNotFound(workspace_id.to_string()))?;
        workspace.upsert_variable(variable);
        Ok(())
    }
}
