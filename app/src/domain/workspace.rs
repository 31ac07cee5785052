//! Workspace bookkeeping types and pure validation functions.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use std::fmt;

use serde::Serialize;
use tfdeploy_common::{VariableDoc, WorkspaceDoc};

use crate::domain::error::WorkspaceError;

/// Maximum workspace name length accepted by the automation service.
pub const MAX_WORKSPACE_NAME_LEN: usize = 90;

/// Maximum variable key length in bytes.
pub const MAX_VARIABLE_KEY_LEN: usize = 128;

/// An authenticated user, identified by email.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor {
    pub email: String,
}

impl Actor {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.email)
    }
}

/// A remote workspace as recorded in the owner's registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteWorkspace {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub variables: Vec<VariableDoc>,
}

impl RemoteWorkspace {
    #[must_use]
    pub fn from_doc(owner: &Actor, doc: WorkspaceDoc) -> Self {
        Self {
            id: doc.id,
            name: doc.name,
            owner: owner.email.clone(),
            variables: doc.variables,
        }
    }
}

/// Validates a workspace name: `^[A-Za-z0-9_-]{1,90}$`.
///
/// # Errors
///
/// Returns `WorkspaceError::InvalidName` if the name is empty, too long, or
/// contains anything outside ASCII alphanumerics, `_`, and `-`.
pub fn validate_workspace_name(name: &str) -> Result<(), WorkspaceError> {
    let valid = !name.is_empty()
        && name.len() <= MAX_WORKSPACE_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(WorkspaceError::InvalidName(name.to_string()))
    }
}

/// Validates a variable key: `^[A-Za-z_][A-Za-z0-9_]*$`, at most 128 bytes.
///
/// # Errors
///
/// Returns `WorkspaceError::InvalidVariableKey` on any violation.
pub fn validate_variable_key(key: &str) -> Result<(), WorkspaceError> {
    let mut chars = key.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if first_ok && rest_ok && key.len() <= MAX_VARIABLE_KEY_LEN {
        Ok(())
    } else {
        Err(WorkspaceError::InvalidVariableKey(key.to_string()))
    }
}
