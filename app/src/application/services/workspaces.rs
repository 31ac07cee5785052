//! Application service: per-user workspace bookkeeping.
//!
//! Remote state is written first; the registry only records what the remote
//! side accepted. Ownership is checked against the registry before any
//! remote call that touches an existing workspace.

use tfdeploy_common::{VariableDoc, WorkspaceDoc, WorkspaceSummary};
use tracing::{info, instrument};

use crate::application::ports::{AutomationClient, WorkspaceRegistry};
use crate::domain::error::{RegistryError, WorkspaceError};
use crate::domain::workspace::{
    Actor, RemoteWorkspace, validate_variable_key, validate_workspace_name,
};

/// Collaborators of the workspace service.
pub struct WorkspaceDeps<'a> {
    pub automation: &'a dyn AutomationClient,
    pub registry: &'a dyn WorkspaceRegistry,
    pub organization: &'a str,
}

/// A variable write request.
#[derive(Debug, Clone)]
pub struct NewVariable<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub sensitive: bool,
}

/// Create a workspace remotely and record it for the actor.
///
/// # Errors
///
/// Returns `InvalidName` before any remote call, or the remote/registry error.
#[instrument(skip_all, fields(actor = %actor, name = %name))]
pub async fn create(
    deps: &WorkspaceDeps<'_>,
    actor: &Actor,
    name: &str,
) -> Result<RemoteWorkspace, WorkspaceError> {
    validate_workspace_name(name)?;
    let id = deps
        .automation
        .create_workspace(deps.organization, name)
        .await?;
    let doc = WorkspaceDoc::new(&id, name);
    deps.registry
        .append_workspace(&actor.email, doc.clone())
        .await?;
    info!(workspace_id = %id, "workspace created");
    Ok(RemoteWorkspace::from_doc(actor, doc))
}

/// The actor's recorded workspaces. Sensitive values are never present.
///
/// # Errors
///
/// Returns a registry error if the lookup fails.
pub async fn list(
    deps: &WorkspaceDeps<'_>,
    actor: &Actor,
) -> Result<Vec<RemoteWorkspace>, WorkspaceError> {
    let docs = deps
        .registry
        .find_user(&actor.email)
        .await?
        .map(|record| record.workspaces)
        .unwrap_or_default();
    Ok(docs
        .into_iter()
        .map(|doc| RemoteWorkspace::from_doc(actor, doc))
        .collect())
}

/// All workspaces of the organization, as seen by the remote side.
///
/// # Errors
///
/// Returns the remote error if listing fails.
pub async fn list_remote(
    deps: &WorkspaceDeps<'_>,
) -> Result<Vec<WorkspaceSummary>, WorkspaceError> {
    Ok(deps.automation.list_workspaces(deps.organization).await?)
}

/// Reference an existing remote workspace (creating it if missing).
///
/// Importing a workspace the actor already references is a no-op.
///
/// # Errors
///
/// Returns `InvalidName`, or the remote/registry error.
#[instrument(skip_all, fields(actor = %actor, name = %name))]
pub async fn import(
    deps: &WorkspaceDeps<'_>,
    actor: &Actor,
    name: &str,
) -> Result<RemoteWorkspace, WorkspaceError> {
    validate_workspace_name(name)?;
    let id = deps
        .automation
        .resolve_or_create_workspace(deps.organization, name)
        .await?;

    let existing = deps
        .registry
        .find_user(&actor.email)
        .await?
        .and_then(|record| record.workspace(&id).cloned());
    if let Some(doc) = existing {
        info!(workspace_id = %id, "workspace already referenced");
        return Ok(RemoteWorkspace::from_doc(actor, doc));
    }

    let doc = WorkspaceDoc::new(&id, name);
    deps.registry
        .append_workspace(&actor.email, doc.clone())
        .await?;
    info!(workspace_id = %id, "workspace imported");
    Ok(RemoteWorkspace::from_doc(actor, doc))
}

/// Delete one of the actor's workspaces, remotely then locally.
///
/// # Errors
///
/// Returns `NotFound` without any remote call if the actor does not
/// reference the workspace, or the remote/registry error.
#[instrument(skip_all, fields(actor = %actor, workspace_id = %workspace_id))]
pub async fn delete(
    deps: &WorkspaceDeps<'_>,
    actor: &Actor,
    workspace_id: &str,
) -> Result<(), WorkspaceError> {
    ensure_owned(deps, actor, workspace_id).await?;
    deps.automation.delete_workspace(workspace_id).await?;
    deps.registry
        .remove_workspace(&actor.email, workspace_id)
        .await?;
    info!("workspace deleted");
    Ok(())
}

/// Write a variable remotely, then record it with sensitive values withheld.
///
/// # Errors
///
/// Returns `NotFound` or `InvalidVariableKey` before any remote call, or the
/// remote/registry error. Nothing is recorded if the remote write fails.
#[instrument(skip_all, fields(actor = %actor, workspace_id = %workspace_id, key = %variable.key))]
pub async fn add_variable(
    deps: &WorkspaceDeps<'_>,
    actor: &Actor,
    workspace_id: &str,
    variable: NewVariable<'_>,
) -> Result<VariableDoc, WorkspaceError> {
    ensure_owned(deps, actor, workspace_id).await?;
    validate_variable_key(variable.key)?;

    deps.automation
        .add_variable(
            workspace_id,
            variable.key,
            variable.value,
            variable.sensitive,
        )
        .await?;

    let doc = VariableDoc::new(variable.key, variable.value, variable.sensitive);
    deps.registry
        .append_variable(&actor.email, workspace_id, doc.clone())
        .await
        .map_err(|e| match e {
            RegistryError::WorkspaceNotFound(id) => WorkspaceError::NotFound(id),
            other => WorkspaceError::Registry(other),
        })?;
    info!(sensitive = variable.sensitive, "variable recorded");
    Ok(doc)
}

async fn ensure_owned(
    deps: &WorkspaceDeps<'_>,
    actor: &Actor,
    workspace_id: &str,
) -> Result<(), WorkspaceError> {
    let owned = deps
        .registry
        .find_user(&actor.email)
        .await?
        .is_some_and(|record| record.workspace(workspace_id).is_some());
    if owned {
        Ok(())
    } else {
        Err(WorkspaceError::NotFound(workspace_id.to_string()))
    }
}
