//! Application service: plan/apply workflow use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use tracing::{info, instrument, warn};

use crate::application::ports::{AutomationClient, ConfigGenerator};
use crate::domain::config::WorkflowSettings;
use crate::domain::error::{InputError, WorkflowError};
use crate::domain::workflow::{ApplyOutcome, PlanOutcome, WorkflowStage};
use crate::domain::workspace::{Actor, validate_workspace_name};
use crate::domain::{Prompt, ValidatedConfig};

/// Collaborators of one workflow invocation.
pub struct WorkflowDeps<'a> {
    pub generator: &'a dyn ConfigGenerator,
    pub automation: &'a dyn AutomationClient,
    pub settings: &'a WorkflowSettings,
}

/// Run the plan phase: generate, validate, upload, and queue a plan.
///
/// Stops at the first failing step. Nothing remote is touched until the
/// generated text has passed validation, and nothing already created
/// remotely is rolled back on a later failure.
///
/// # Errors
///
/// - `WorkflowError::Input` if the prompt is empty after trimming or the
///   workspace name is invalid.
/// - `WorkflowError::Generation` if the generator fails or returns nothing.
/// - `WorkflowError::Validation` if the text is rejected.
/// - `WorkflowError::Remote` if a workspace, configuration version, upload,
///   or run call fails.
#[instrument(skip_all, fields(actor = %actor))]
pub async fn plan(
    deps: &WorkflowDeps<'_>,
    actor: &Actor,
    raw_prompt: &str,
    workspace_name: Option<&str>,
) -> Result<PlanOutcome, WorkflowError> {
    let prompt = Prompt::parse(raw_prompt)?;
    let workspace_name = workspace_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(deps.settings.default_workspace.as_str());
    validate_workspace_name(workspace_name)
        .map_err(|_| InputError::InvalidWorkspaceName(workspace_name.to_string()))?;

    info!(stage = %WorkflowStage::Generating, "requesting configuration");
    let generated = deps.generator.generate(&prompt).await?;

    info!(
        stage = %WorkflowStage::Validating,
        len = generated.len(),
        "validating configuration"
    );
    let config = ValidatedConfig::new(generated).inspect_err(|e| {
        warn!(stage = %WorkflowStage::Validating, reason = %e.reason, "configuration rejected");
    })?;

    let workspace_id = deps
        .automation
        .resolve_or_create_workspace(&deps.settings.organization, workspace_name)
        .await?;

    let version = deps
        .automation
        .create_configuration_version(&workspace_id, false)
        .await?;
    info!(
        stage = %WorkflowStage::ConfigCreated,
        workspace_id = %workspace_id,
        configuration_version = %version.id,
        "configuration version created"
    );

    deps.automation
        .upload_configuration(&version.upload_url, &config)
        .await?;
    info!(stage = %WorkflowStage::Uploaded, workspace_id = %workspace_id, "configuration uploaded");

    let run_id = deps
        .automation
        .trigger_plan_run(
            &workspace_id,
            &version.id,
            deps.settings.run_policy.auto_apply(),
        )
        .await?;
    info!(stage = %WorkflowStage::PlanQueued, run_id = %run_id, "plan queued");

    let can_apply = deps.automation.check_apply_permission(&workspace_id).await;
    info!(
        stage = %WorkflowStage::AwaitingApplyDecision,
        run_id = %run_id,
        can_apply,
        "awaiting apply decision"
    );

    Ok(PlanOutcome {
        workspace_id,
        message: PlanOutcome::queued_message(&run_id),
        run_id,
        configuration: config.into_inner().into_string(),
        can_apply,
        stage: WorkflowStage::AwaitingApplyDecision,
    })
}

/// Run the apply phase for a previously planned run.
///
/// No local state is kept between plan and apply: any run id is forwarded,
/// and repeated calls are forwarded again.
///
/// # Errors
///
/// - `WorkflowError::Input` if the run id is empty.
/// - `WorkflowError::Apply` if the remote side refuses the apply.
#[instrument(skip_all, fields(actor = %actor, run_id = %run_id))]
pub async fn apply(
    automation: &dyn AutomationClient,
    actor: &Actor,
    run_id: &str,
) -> Result<ApplyOutcome, WorkflowError> {
    let run_id = run_id.trim();
    if run_id.is_empty() {
        return Err(InputError::EmptyRunId.into());
    }

    if !automation.apply_run(run_id).await {
        warn!("apply refused");
        return Err(WorkflowError::Apply {
            run_id: run_id.to_string(),
        });
    }

    info!(stage = %WorkflowStage::Applied, "apply submitted");
    Ok(ApplyOutcome::submitted(run_id))
}
