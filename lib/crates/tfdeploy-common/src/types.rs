use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A workspace variable as recorded in the local registry.
///
/// Sensitive values never reach the registry: `value` is `None` whenever
/// `sensitive` is set, the value only lives on the remote side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariableDoc {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub sensitive: bool,
}

impl VariableDoc {
    /// Build a registry entry, withholding the value of sensitive variables.
    pub fn new(key: &str, value: &str, sensitive: bool) -> Self {
        Self {
            key: key.to_string(),
            value: (!sensitive).then(|| value.to_string()),
            sensitive,
        }
    }
}

/// A remote workspace referenced by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceDoc {
    /// Identifier assigned by the remote automation platform (`ws-...`).
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Ordered by first insertion; keys are unique.
    #[serde(default)]
    pub variables: Vec<VariableDoc>,
}

impl WorkspaceDoc {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
            variables: Vec::new(),
        }
    }

    /// Insert a variable, replacing any existing entry with the same key in place.
    pub fn upsert_variable(&mut self, variable: VariableDoc) {
        match self.variables.iter_mut().find(|v| v.key == variable.key) {
            Some(existing) => *existing = variable,
            None => self.variables.push(variable),
        }
    }
}

/// A registered user and the workspaces they reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub email: String,
    /// Salted digest, `sha256$<salt>$<hex>`.
    pub password_hash: String,
    #[serde(default)]
    pub workspaces: Vec<WorkspaceDoc>,
}

impl UserRecord {
    pub fn new(email: &str, password_hash: &str) -> Self {
        Self {
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            workspaces: Vec::new(),
        }
    }

    pub fn workspace(&self, workspace_id: &str) -> Option<&WorkspaceDoc> {
        self.workspaces.iter().find(|w| w.id == workspace_id)
    }

    pub fn workspace_mut(&mut self, workspace_id: &str) -> Option<&mut WorkspaceDoc> {
        self.workspaces.iter_mut().find(|w| w.id == workspace_id)
    }
}

/// Id/name pair returned when listing the organization's remote workspaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceSummary {
    pub id: String,
    pub name: String,
}
