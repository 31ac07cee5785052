//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and the shared types crate,
//! never from `crate::infra` or `crate::web`.
//!
//! Ports are object-safe (`async_trait`, `Send + Sync`) so the web layer can
//! hold them as `Arc<dyn …>` in shared state.

use async_trait::async_trait;
use tfdeploy_common::{UserRecord, VariableDoc, WorkspaceDoc, WorkspaceSummary};

use crate::domain::workspace::Actor;
use crate::domain::{
    ConfigurationVersion, GeneratedConfig, GenerationError, Prompt, RegistryError, RemoteError,
    ValidatedConfig,
};

// ── Generation ────────────────────────────────────────────────────────────────

/// Turns a deployment prompt into configuration text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigGenerator: Send + Sync {
    /// Exactly one upstream call per invocation. Never retried.
    async fn generate(&self, prompt: &Prompt) -> Result<GeneratedConfig, GenerationError>;
}

// ── Remote automation ─────────────────────────────────────────────────────────

/// Remote automation API: workspaces, variables, configuration versions, runs.
///
/// Every call is one round trip with a client-side timeout and no retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AutomationClient: Send + Sync {
    /// Look up a workspace by name, creating it when the lookup returns 404.
    async fn resolve_or_create_workspace(
        &self,
        organization: &str,
        name: &str,
    ) -> Result<String, RemoteError>;

    /// Create a workspace and return its id.
    async fn create_workspace(&self, organization: &str, name: &str)
    -> Result<String, RemoteError>;

    async fn delete_workspace(&self, workspace_id: &str) -> Result<(), RemoteError>;

    async fn list_workspaces(
        &self,
        organization: &str,
    ) -> Result<Vec<WorkspaceSummary>, RemoteError>;

    /// Write a Terraform (non-HCL) variable to a workspace.
    async fn add_variable(
        &self,
        workspace_id: &str,
        key: &str,
        value: &str,
        sensitive: bool,
    ) -> Result<(), RemoteError>;

    async fn create_configuration_version(
        &self,
        workspace_id: &str,
        auto_queue_runs: bool,
    ) -> Result<ConfigurationVersion, RemoteError>;

    /// Upload a validated configuration as a tar.gz archive.
    async fn upload_configuration(
        &self,
        upload_url: &str,
        config: &ValidatedConfig,
    ) -> Result<(), RemoteError>;

    /// Queue a run against a configuration version and return the run id.
    async fn trigger_plan_run(
        &self,
        workspace_id: &str,
        configuration_version_id: &str,
        auto_apply: bool,
    ) -> Result<String, RemoteError>;

    /// Whether the caller may queue an apply. `false` on any failure.
    async fn check_apply_permission(&self, workspace_id: &str) -> bool;

    /// Request an apply. `true` only on an exact 200 response.
    async fn apply_run(&self, run_id: &str) -> bool;
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Per-user document store of referenced workspaces and their variables.
///
/// Each update is atomic per user document.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkspaceRegistry: Send + Sync {
    async fn find_user(&self, email: &str) -> Result<Option<UserRecord>, RegistryError>;

    /// Fails with `RegistryError::UserExists` if the email is taken.
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<(), RegistryError>;

    async fn append_workspace(&self, email: &str, doc: WorkspaceDoc) -> Result<(), RegistryError>;

    /// Returns whether a document was removed.
    async fn remove_workspace(&self, email: &str, workspace_id: &str)
    -> Result<bool, RegistryError>;

    /// Upsert a variable by key. Fails with `RegistryError::WorkspaceNotFound`
    /// if the user does not reference the workspace.
    async fn append_variable(
        &self,
        email: &str,
        workspace_id: &str,
        variable: VariableDoc,
    ) -> Result<(), RegistryError>;
}

// ── Sessions ──────────────────────────────────────────────────────────────────

/// Opaque bearer-token sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Issue a fresh token for the actor.
    async fn issue(&self, actor: &Actor) -> String;

    /// Resolve a live token. Expired tokens resolve to `None`.
    async fn resolve(&self, token: &str) -> Option<Actor>;

    /// Returns whether a live session was revoked.
    async fn revoke(&self, token: &str) -> bool;
}
