//! HTTP front end: axum router over the application services.
//!
//! Endpoints:
//! - GET    /health                        liveness (no auth)
//! - POST   /auth/register                 create a user (no auth)
//! - POST   /auth/login                    issue a session token (no auth)
//! - POST   /auth/logout                   revoke the caller's token
//! - POST   /validate                      run the validator on `{text}` (no auth)
//! - POST   /generate                      plan phase
//! - POST   /apply                         apply phase
//! - GET    /workspaces                    caller's workspaces
//! - POST   /workspaces                    create a workspace
//! - POST   /workspaces/import             reference an existing workspace
//! - GET    /workspaces/remote             the organization's workspaces
//! - DELETE /workspaces/{id}               delete a workspace
//! - POST   /workspaces/{id}/variables     add a variable
//!
//! All bodies, including errors, are JSON.

pub mod auth;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use tower_http::trace::TraceLayer;

use crate::application::ports::{
    AutomationClient, ConfigGenerator, SessionStore, WorkspaceRegistry,
};
use crate::domain::config::AppConfig;

/// Maximum request body size: 1 MiB.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared state handed to every handler.
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub generator: Arc<dyn ConfigGenerator>,
    pub automation: Arc<dyn AutomationClient>,
    pub registry: Arc<dyn WorkspaceRegistry>,
    pub sessions: Arc<dyn SessionStore>,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", post(handlers::logout))
        .route("/validate", post(handlers::validate))
        .route("/generate", post(handlers::generate))
        .route("/apply", post(handlers::apply))
        .route(
            "/workspaces",
            get(handlers::list_workspaces).post(handlers::create_workspace),
        )
        .route("/workspaces/import", post(handlers::import_workspace))
        .route("/workspaces/remote", get(handlers::list_remote_workspaces))
        .route("/workspaces/{id}", delete(handlers::delete_workspace))
        .route("/workspaces/{id}/variables", post(handlers::add_variable))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
