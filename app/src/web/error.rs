//! JSON error responses.
//!
//! Every failure leaves the service as `{"error": "...", "kind": "..."}`
//! with a status derived from the domain error variant.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::{AuthError, RegistryError, WorkflowError, WorkspaceError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    kind: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }

    pub fn unauthenticated() -> Self {
        Self::from(AuthError::Unauthenticated)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: &self.message,
            kind: self.kind,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Every body rejection is a 400; 422 stays reserved for validator rejections.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "input_error", rejection.body_text())
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        let status = match &err {
            WorkflowError::Input(_) => StatusCode::BAD_REQUEST,
            WorkflowError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            WorkflowError::Generation(_) | WorkflowError::Remote(_) | WorkflowError::Apply { .. } => {
                StatusCode::BAD_GATEWAY
            }
        };
        Self::new(status, err.kind(), err.to_string())
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UserExists(_) => Self::new(StatusCode::CONFLICT, "conflict", err.to_string()),
            RegistryError::UserNotFound(_) | RegistryError::WorkspaceNotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "not_found", err.to_string())
            }
            RegistryError::Backend(detail) => {
                tracing::error!(error = %detail, "registry failure");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "registry_error",
                    "Workspace registry unavailable.",
                )
            }
        }
    }
}

impl From<WorkspaceError> for ApiError {
    fn from(err: WorkspaceError) -> Self {
        match err {
            WorkspaceError::InvalidName(_) | WorkspaceError::InvalidVariableKey(_) => {
                Self::new(StatusCode::BAD_REQUEST, "input_error", err.to_string())
            }
            WorkspaceError::NotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, "not_found", err.to_string())
            }
            WorkspaceError::Remote(_) => {
                Self::new(StatusCode::BAD_GATEWAY, "remote_error", err.to_string())
            }
            WorkspaceError::Registry(inner) => inner.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail(_) | AuthError::WeakPassword { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "input_error", err.to_string())
            }
            AuthError::UserExists => Self::new(StatusCode::CONFLICT, "conflict", err.to_string()),
            AuthError::InvalidCredentials | AuthError::Unauthenticated => {
                Self::new(StatusCode::UNAUTHORIZED, "auth_error", err.to_string())
            }
            AuthError::Registry(inner) => inner.into(),
        }
    }
}
