//! Unit tests for registration, login, and session handling.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use tfdeploy::application::ports::WorkspaceRegistry;
use tfdeploy::application::services::auth;
use tfdeploy::domain::{Actor, AuthError};
use tfdeploy::infra::registry::MemoryRegistry;
use tfdeploy::infra::session::MemorySessionStore;

fn sessions() -> MemorySessionStore {
    MemorySessionStore::new(Duration::from_secs(600))
}

#[tokio::test]
async fn test_register_then_login_issues_working_token() {
    let registry = MemoryRegistry::new();
    let sessions = sessions();

    let actor = auth::register(&registry, " dev@example.com ", "correct horse")
        .await
        .expect("register");
    assert_eq!(actor, Actor::new("dev@example.com"));

    let token = auth::login(&registry, &sessions, "dev@example.com", "correct horse")
        .await
        .expect("login");
    let resolved = auth::authenticate(&sessions, &token)
        .await
        .expect("authenticate");
    assert_eq!(resolved, actor);
}

#[tokio::test]
async fn test_register_stores_salted_hash_not_password() {
    let registry = MemoryRegistry::new();
    auth::register(&registry, "dev@example.com", "correct horse")
        .await
        .expect("register");

    let record = registry
        .find_user("dev@example.com")
        .await
        .expect("find")
        .expect("present");
    assert!(record.password_hash.starts_with("sha256$"));
    assert!(!record.password_hash.contains("correct horse"));
}

#[tokio::test]
async fn test_register_duplicate_is_user_exists() {
    let registry = MemoryRegistry::new();
    auth::register(&registry, "dev@example.com", "correct horse")
        .await
        .expect("first");
    let err = auth::register(&registry, "dev@example.com", "another pass")
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::UserExists);
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let registry = MemoryRegistry::new();
    let err = auth::register(&registry, "dev@example.com", "short")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::WeakPassword { .. }));
    assert!(registry.find_user("dev@example.com").await.expect("find").is_none());
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let registry = MemoryRegistry::new();
    let err = auth::register(&registry, "not-an-email", "correct horse")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidEmail(_)));
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_user_look_the_same() {
    let registry = MemoryRegistry::new();
    let sessions = sessions();
    auth::register(&registry, "dev@example.com", "correct horse")
        .await
        .expect("register");

    let wrong = auth::login(&registry, &sessions, "dev@example.com", "wrong horse")
        .await
        .unwrap_err();
    let unknown = auth::login(&registry, &sessions, "ghost@example.com", "correct horse")
        .await
        .unwrap_err();

    assert_eq!(wrong, AuthError::InvalidCredentials);
    assert_eq!(wrong, unknown);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let registry = MemoryRegistry::new();
    let sessions = sessions();
    auth::register(&registry, "dev@example.com", "correct horse")
        .await
        .expect("register");
    let token = auth::login(&registry, &sessions, "dev@example.com", "correct horse")
        .await
        .expect("login");

    auth::logout(&sessions, &token).await.expect("logout");

    assert_eq!(
        auth::authenticate(&sessions, &token).await.unwrap_err(),
        AuthError::Unauthenticated
    );
    assert_eq!(
        auth::logout(&sessions, &token).await.unwrap_err(),
        AuthError::Unauthenticated
    );
}
