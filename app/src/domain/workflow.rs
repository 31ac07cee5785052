//! Plan/apply workflow vocabulary: stages, remote steps, outcomes.
//!
//! Pure types only: no I/O, no async.

use std::fmt;

use serde::Serialize;

/// Stage of one plan/apply workflow instance.
///
/// `Idle → Generating → Validating → ConfigCreated → Uploaded → PlanQueued
/// → AwaitingApplyDecision → Applied | Stopped`. `Stopped` is never entered
/// explicitly: it is what happens when nobody calls apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    /// Before any work; the initial stage of every instance.
    Idle,
    Generating,
    Validating,
    ConfigCreated,
    Uploaded,
    PlanQueued,
    AwaitingApplyDecision,
    Applied,
    /// Plan finished without an apply request.
    Stopped,
}

impl WorkflowStage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Generating => "generating",
            Self::Validating => "validating",
            Self::ConfigCreated => "config_created",
            Self::Uploaded => "uploaded",
            Self::PlanQueued => "plan_queued",
            Self::AwaitingApplyDecision => "awaiting_apply_decision",
            Self::Applied => "applied",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote automation API call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteStep {
    WorkspaceLookup,
    WorkspaceCreate,
    WorkspaceDelete,
    WorkspaceList,
    VariableWrite,
    ConfigurationVersion,
    Upload,
    PlanRun,
    PermissionCheck,
    Apply,
}

impl RemoteStep {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WorkspaceLookup => "workspace lookup",
            Self::WorkspaceCreate => "workspace creation",
            Self::WorkspaceDelete => "workspace deletion",
            Self::WorkspaceList => "workspace listing",
            Self::VariableWrite => "variable write",
            Self::ConfigurationVersion => "configuration version creation",
            Self::Upload => "configuration upload",
            Self::PlanRun => "plan run",
            Self::PermissionCheck => "permission check",
            Self::Apply => "apply",
        }
    }
}

impl fmt::Display for RemoteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configuration version created on the remote side, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationVersion {
    pub id: String,
    /// One-time archive upload target.
    pub upload_url: String,
}

/// Result of the plan phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanOutcome {
    pub workspace_id: String,
    pub run_id: String,
    /// The configuration that was uploaded.
    pub configuration: String,
    /// Whether the caller may invoke the apply phase for this run.
    pub can_apply: bool,
    pub message: String,
    pub stage: WorkflowStage,
}

impl PlanOutcome {
    #[must_use]
    pub fn queued_message(run_id: &str) -> String {
        format!("Plan queued successfully. Run ID: {run_id}")
    }
}

/// Result of the apply phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyOutcome {
    pub run_id: String,
    pub message: String,
    pub stage: WorkflowStage,
}

impl ApplyOutcome {
    #[must_use]
    pub fn submitted(run_id: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            message: format!("Apply request submitted for run {run_id}."),
            stage: WorkflowStage::Applied,
        }
    }
}
