//! Application service: registration, login, and sessions.

use tfdeploy_common::validate_email;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::application::ports::{SessionStore, WorkspaceRegistry};
use crate::domain::credentials::{hash_password, validate_password, verify_password};
use crate::domain::error::AuthError;
use crate::domain::workspace::Actor;

/// Register a new user.
///
/// # Errors
///
/// Returns `InvalidEmail`, `WeakPassword`, `UserExists`, or a registry error.
#[instrument(skip_all, fields(actor = %email))]
pub async fn register(
    registry: &dyn WorkspaceRegistry,
    email: &str,
    password: &str,
) -> Result<Actor, AuthError> {
    let email = email.trim();
    validate_email(email).map_err(AuthError::InvalidEmail)?;
    validate_password(password)?;

    let salt = Uuid::new_v4().simple().to_string();
    registry
        .create_user(email, &hash_password(password, &salt))
        .await?;
    info!("user registered");
    Ok(Actor::new(email))
}

/// Verify credentials and issue a session token.
///
/// Unknown users and wrong passwords produce the same error.
///
/// # Errors
///
/// Returns `InvalidCredentials`, or a registry error.
#[instrument(skip_all, fields(actor = %email))]
pub async fn login(
    registry: &dyn WorkspaceRegistry,
    sessions: &dyn SessionStore,
    email: &str,
    password: &str,
) -> Result<String, AuthError> {
    let email = email.trim();
    let verified = registry
        .find_user(email)
        .await?
        .is_some_and(|record| verify_password(password, &record.password_hash));
    if !verified {
        warn!("login rejected");
        return Err(AuthError::InvalidCredentials);
    }
    let token = sessions.issue(&Actor::new(email)).await;
    info!("session issued");
    Ok(token)
}

/// Revoke a session token.
///
/// # Errors
///
/// Returns `Unauthenticated` if the token was not a live session.
pub async fn logout(sessions: &dyn SessionStore, token: &str) -> Result<(), AuthError> {
    if sessions.revoke(token).await {
        Ok(())
    } else {
        Err(AuthError::Unauthenticated)
    }
}

/// Resolve a bearer token to an actor.
///
/// # Errors
///
/// Returns `Unauthenticated` for unknown or expired tokens.
pub async fn authenticate(sessions: &dyn SessionStore, token: &str) -> Result<Actor, AuthError> {
    sessions
        .resolve(token)
        .await
        .ok_or(AuthError::Unauthenticated)
}
