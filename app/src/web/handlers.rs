//! Route handlers. Each one parses its body, calls one service, and maps
//! the result onto a status code.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tfdeploy_common::{VariableDoc, WorkspaceSummary};

use crate::application::services::plan_apply::{self, WorkflowDeps};
use crate::application::services::workspaces::{self, NewVariable, WorkspaceDeps};
use crate::application::services::auth;
use crate::domain::{ApplyOutcome, PlanOutcome, RemoteWorkspace, ValidationResult, validate_config};
use crate::web::AppState;
use crate::web::auth::Authenticated;
use crate::web::error::ApiError;

type ApiResult<T> = Result<T, ApiError>;

// ── Request / response bodies ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisteredResponse {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub workspace: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    #[serde(default)]
    pub run_id: String,
}

#[derive(Debug, Deserialize)]
pub struct WorkspaceNameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct VariableRequest {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub sensitive: bool,
}

fn workspace_deps(state: &AppState) -> WorkspaceDeps<'_> {
    WorkspaceDeps {
        automation: state.automation.as_ref(),
        registry: state.registry.as_ref(),
        organization: &state.config.workflow.organization,
    }
}

// ── Health ───────────────────────────────────────────────────────────────────

/// Minimal health-check handler for containers and load balancers.
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ── Auth ─────────────────────────────────────────────────────────────────────

pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisteredResponse>)> {
    let Json(body) = body?;
    let actor = auth::register(state.registry.as_ref(), &body.email, &body.password).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisteredResponse { email: actor.email }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(body) = body?;
    let token = auth::login(
        state.registry.as_ref(),
        state.sessions.as_ref(),
        &body.email,
        &body.password,
    )
    .await?;
    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: state.config.session_ttl.as_secs(),
    }))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
    caller: Authenticated,
) -> ApiResult<StatusCode> {
    auth::logout(state.sessions.as_ref(), &caller.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Validate / plan / apply ──────────────────────────────────────────────────

pub async fn validate(
    body: Result<Json<ValidateRequest>, JsonRejection>,
) -> ApiResult<Json<ValidationResult>> {
    let Json(body) = body?;
    Ok(Json(validate_config(&body.text)))
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    caller: Authenticated,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Json<PlanOutcome>> {
    let Json(body) = body?;
    let deps = WorkflowDeps {
        generator: state.generator.as_ref(),
        automation: state.automation.as_ref(),
        settings: &state.config.workflow,
    };
    let outcome = plan_apply::plan(&deps, &caller.actor, &body.prompt, body.workspace.as_deref()).await?;
    Ok(Json(outcome))
}

pub async fn apply(
    State(state): State<Arc<AppState>>,
    caller: Authenticated,
    body: Result<Json<ApplyRequest>, JsonRejection>,
) -> ApiResult<Json<ApplyOutcome>> {
    let Json(body) = body?;
    let outcome = plan_apply::apply(state.automation.as_ref(), &caller.actor, &body.run_id).await?;
    Ok(Json(outcome))
}

// ── Workspaces ───────────────────────────────────────────────────────────────

pub async fn list_workspaces(
    State(state): State<Arc<AppState>>,
    caller: Authenticated,
) -> ApiResult<Json<Vec<RemoteWorkspace>>> {
    Ok(Json(workspaces::list(&workspace_deps(&state), &caller.actor).await?))
}

pub async fn create_workspace(
    State(state): State<Arc<AppState>>,
    caller: Authenticated,
    body: Result<Json<WorkspaceNameRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RemoteWorkspace>)> {
    let Json(body) = body?;
    let workspace = workspaces::create(&workspace_deps(&state), &caller.actor, body.name.trim()).await?;
    Ok((StatusCode::CREATED, Json(workspace)))
}

pub async fn import_workspace(
    State(state): State<Arc<AppState>>,
    caller: Authenticated,
    body: Result<Json<WorkspaceNameRequest>, JsonRejection>,
) -> ApiResult<Json<RemoteWorkspace>> {
    let Json(body) = body?;
    let workspace = workspaces::import(&workspace_deps(&state), &caller.actor, body.name.trim()).await?;
    Ok(Json(workspace))
}

pub async fn list_remote_workspaces(
    State(state): State<Arc<AppState>>,
    _caller: Authenticated,
) -> ApiResult<Json<Vec<WorkspaceSummary>>> {
    Ok(Json(workspaces::list_remote(&workspace_deps(&state)).await?))
}

pub async fn delete_workspace(
    State(state): State<Arc<AppState>>,
    caller: Authenticated,
    Path(workspace_id): Path<String>,
) -> ApiResult<StatusCode> {
    workspaces::delete(&workspace_deps(&state), &caller.actor, &workspace_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_variable(
    State(state): State<Arc<AppState>>,
    caller: Authenticated,
    Path(workspace_id): Path<String>,
    body: Result<Json<VariableRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<VariableDoc>)> {
    let Json(body) = body?;
    let variable = workspaces::add_variable(
        &workspace_deps(&state),
        &caller.actor,
        &workspace_id,
        NewVariable {
            key: body.key.trim(),
            value: &body.value,
            sensitive: body.sensitive,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(variable)))
}
