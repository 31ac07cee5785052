//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::web`,
//! `crate::application`, or `tokio`. All error types implement
//! `thiserror::Error` and convert to `anyhow::Error` via the `?` operator.

use thiserror::Error;

use crate::domain::validate::ValidationReason;
use crate::domain::workflow::RemoteStep;

// ── Workflow errors ───────────────────────────────────────────────────────────

/// Missing or empty user input, caught before any external call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Provide a deployment prompt.")]
    EmptyPrompt,

    #[error("Provide a run id.")]
    EmptyRunId,

    #[error("Invalid workspace name '{0}'.")]
    InvalidWorkspaceName(String),
}

/// Generation backend failure. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("no configuration returned by the generation backend")]
    EmptyOutput,

    #[error("generation backend failure: {0}")]
    Backend(String),
}

/// Local heuristic rejection of generated text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {reason}")]
pub struct ValidationError {
    pub reason: ValidationReason,
}

/// Non-success response (or transport failure) from the automation API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{step} failed: {detail}")]
pub struct RemoteError {
    pub step: RemoteStep,
    /// HTTP status when the remote answered, `None` on transport failure.
    pub status: Option<u16>,
    pub detail: String,
}

impl RemoteError {
    pub fn new(step: RemoteStep, status: Option<u16>, detail: impl Into<String>) -> Self {
        Self {
            step,
            status,
            detail: detail.into(),
        }
    }
}

/// Terminal failure of one plan or apply invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Error generating code: {0}")]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Terraform Cloud error: {0}")]
    Remote(#[from] RemoteError),

    /// Apply was refused after a successful plan; the plan result stands.
    #[error("Failed to start apply for run {run_id}.")]
    Apply { run_id: String },
}

impl WorkflowError {
    /// Short machine-readable kind, used in API error bodies.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Input(_) => "input_error",
            Self::Generation(_) => "generation_error",
            Self::Validation(_) => "validation_error",
            Self::Remote(_) => "remote_error",
            Self::Apply { .. } => "apply_error",
        }
    }
}

// ── Registry errors ───────────────────────────────────────────────────────────

/// Errors from the workspace registry collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("User '{0}' already exists.")]
    UserExists(String),

    #[error("User '{0}' not found.")]
    UserNotFound(String),

    #[error("Workspace '{0}' not found.")]
    WorkspaceNotFound(String),

    #[error("registry backend failure: {0}")]
    Backend(String),
}

// ── Workspace bookkeeping errors ──────────────────────────────────────────────

/// Errors related to workspace bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("Invalid workspace name '{0}': must match ^[A-Za-z0-9_-]{{1,90}}$")]
    InvalidName(String),

    #[error("Invalid variable key '{0}': must match ^[A-Za-z_][A-Za-z0-9_]*$ (max 128 bytes)")]
    InvalidVariableKey(String),

    #[error("Workspace '{0}' not found.")]
    NotFound(String),

    #[error("Terraform Cloud error: {0}")]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

// ── Auth errors ───────────────────────────────────────────────────────────────

/// Errors related to registration, login, and sessions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email: {0}")]
    InvalidEmail(&'static str),

    #[error("Password must be at least {min} characters.")]
    WeakPassword { min: usize },

    #[error("An account with this email already exists.")]
    UserExists,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Authentication required.")]
    Unauthenticated,

    #[error(transparent)]
    Registry(RegistryError),
}

impl From<RegistryError> for AuthError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UserExists(_) => Self::UserExists,
            other => Self::Registry(other),
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to startup configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: &'static str,
        value: String,
        valid: String,
    },
}
