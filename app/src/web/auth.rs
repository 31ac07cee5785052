//! Request-scoped authentication.
//!
//! `Authorization: Bearer <token>` is resolved against the session store
//! into an [`Authenticated`] value that handlers receive as an argument.
//! Nothing about the caller is kept outside the request.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::application::services::auth;
use crate::domain::workspace::Actor;
use crate::web::AppState;
use crate::web::error::ApiError;

/// The caller of an authenticated route.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub actor: Actor,
    pub token: String,
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequestParts<Arc<AppState>> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(ApiError::unauthenticated)?
            .to_string();

        let actor = auth::authenticate(state.sessions.as_ref(), &token).await?;
        Ok(Self { actor, token })
    }
}
