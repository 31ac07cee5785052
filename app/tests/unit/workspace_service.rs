//! Unit tests for workspace bookkeeping against the in-memory registry.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use tfdeploy::application::ports::WorkspaceRegistry;
use tfdeploy::application::services::workspaces::{self, NewVariable, WorkspaceDeps};
use tfdeploy::domain::{Actor, RemoteStep, WorkspaceError};
use tfdeploy::infra::registry::MemoryRegistry;
use tfdeploy_common::WorkspaceSummary;

use crate::mocks::{RecordingAutomation, actor};

async fn registry_with_user(actor: &Actor) -> MemoryRegistry {
    let registry = MemoryRegistry::new();
    registry
        .create_user(&actor.email, "sha256$salt$hash")
        .await
        .expect("create user");
    registry
}

fn deps<'a>(
    automation: &'a RecordingAutomation,
    registry: &'a MemoryRegistry,
) -> WorkspaceDeps<'a> {
    WorkspaceDeps {
        automation,
        registry,
        organization: "acme",
    }
}

// ── create / list ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_records_workspace_for_owner() {
    let automation = RecordingAutomation::new();
    let registry = registry_with_user(&actor()).await;

    let ws = workspaces::create(&deps(&automation, &registry), &actor(), "team-x")
        .await
        .expect("create");

    assert_eq!(ws.id, "ws-team-x");
    assert_eq!(ws.name, "team-x");
    assert_eq!(ws.owner, "dev@example.com");
    assert_eq!(automation.calls(), vec!["create_workspace:acme/team-x"]);

    let listed = workspaces::list(&deps(&automation, &registry), &actor())
        .await
        .expect("list");
    assert_eq!(listed, vec![ws]);
}

#[tokio::test]
async fn test_create_remote_failure_records_nothing() {
    let automation = RecordingAutomation::new().failing_at(RemoteStep::WorkspaceCreate);
    let registry = registry_with_user(&actor()).await;

    let err = workspaces::create(&deps(&automation, &registry), &actor(), "team-x")
        .await
        .unwrap_err();

    assert!(matches!(err, WorkspaceError::Remote(_)));
    let listed = workspaces::list(&deps(&automation, &registry), &actor())
        .await
        .expect("list");
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_create_invalid_name_makes_no_remote_call() {
    let automation = RecordingAutomation::new();
    let registry = registry_with_user(&actor()).await;

    let err = workspaces::create(&deps(&automation, &registry), &actor(), "has space")
        .await
        .unwrap_err();

    assert_eq!(err, WorkspaceError::InvalidName("has space".to_string()));
    assert!(automation.calls().is_empty());
}

#[tokio::test]
async fn test_list_unknown_user_is_empty() {
    let automation = RecordingAutomation::new();
    let registry = MemoryRegistry::new();
    let listed = workspaces::list(&deps(&automation, &registry), &actor())
        .await
        .expect("list");
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_list_remote_passes_through() {
    let automation = RecordingAutomation::new().with_remote_workspaces(vec![WorkspaceSummary {
        id: "ws-1".to_string(),
        name: "one".to_string(),
    }]);
    let registry = MemoryRegistry::new();

    let remote = workspaces::list_remote(&deps(&automation, &registry))
        .await
        .expect("list remote");
    assert_eq!(remote.len(), 1);
    assert_eq!(remote[0].name, "one");
}

// ── import ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_import_is_idempotent() {
    let automation = RecordingAutomation::new();
    let registry = registry_with_user(&actor()).await;
    let d = deps(&automation, &registry);

    let first = workspaces::import(&d, &actor(), "shared").await.expect("first");
    let second = workspaces::import(&d, &actor(), "shared").await.expect("second");

    assert_eq!(first, second);
    let listed = workspaces::list(&d, &actor()).await.expect("list");
    assert_eq!(listed.len(), 1);
}

// ── delete ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_removes_remote_then_local() {
    let automation = RecordingAutomation::new();
    let registry = registry_with_user(&actor()).await;
    let d = deps(&automation, &registry);
    workspaces::create(&d, &actor(), "team-x").await.expect("create");

    workspaces::delete(&d, &actor(), "ws-team-x")
        .await
        .expect("delete");

    assert_eq!(
        automation.call_names(),
        vec!["create_workspace", "delete_workspace"]
    );
    assert!(workspaces::list(&d, &actor()).await.expect("list").is_empty());
}

#[tokio::test]
async fn test_delete_other_users_workspace_is_not_found() {
    let owner = actor();
    let intruder = Actor::new("other@example.com");
    let automation = RecordingAutomation::new();
    let registry = registry_with_user(&owner).await;
    registry
        .create_user(&intruder.email, "sha256$salt$hash")
        .await
        .expect("create intruder");
    let d = deps(&automation, &registry);
    workspaces::create(&d, &owner, "team-x").await.expect("create");

    let err = workspaces::delete(&d, &intruder, "ws-team-x")
        .await
        .unwrap_err();

    assert_eq!(err, WorkspaceError::NotFound("ws-team-x".to_string()));
    assert_eq!(automation.call_names(), vec!["create_workspace"]);
}

// ── variables ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_sensitive_variable_withholds_value_locally() {
    let automation = RecordingAutomation::new();
    let registry = registry_with_user(&actor()).await;
    let d = deps(&automation, &registry);
    workspaces::create(&d, &actor(), "team-x").await.expect("create");

    let doc = workspaces::add_variable(
        &d,
        &actor(),
        "ws-team-x",
        NewVariable {
            key: "ARM_CLIENT_SECRET",
            value: "s3cr3t",
            sensitive: true,
        },
    )
    .await
    .expect("add variable");

    assert_eq!(doc.key, "ARM_CLIENT_SECRET");
    assert!(doc.sensitive);
    assert!(doc.value.is_none());

    // The real value still goes to the remote side.
    assert_eq!(
        automation.variables(),
        vec![(
            "ws-team-x".to_string(),
            "ARM_CLIENT_SECRET".to_string(),
            "s3cr3t".to_string(),
            true
        )]
    );

    let listed = workspaces::list(&d, &actor()).await.expect("list");
    assert_eq!(listed[0].variables, vec![doc]);
}

#[tokio::test]
async fn test_add_variable_invalid_key_makes_no_remote_call() {
    let automation = RecordingAutomation::new();
    let registry = registry_with_user(&actor()).await;
    let d = deps(&automation, &registry);
    workspaces::create(&d, &actor(), "team-x").await.expect("create");

    let err = workspaces::add_variable(
        &d,
        &actor(),
        "ws-team-x",
        NewVariable {
            key: "1bad-key",
            value: "v",
            sensitive: false,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, WorkspaceError::InvalidVariableKey(_)));
    assert_eq!(automation.call_names(), vec!["create_workspace"]);
}

#[tokio::test]
async fn test_add_variable_remote_failure_records_nothing() {
    let automation = RecordingAutomation::new().failing_at(RemoteStep::VariableWrite);
    let registry = registry_with_user(&actor()).await;
    let d = deps(&automation, &registry);
    workspaces::create(&d, &actor(), "team-x").await.expect("create");

    let err = workspaces::add_variable(
        &d,
        &actor(),
        "ws-team-x",
        NewVariable {
            key: "region",
            value: "eastus",
            sensitive: false,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, WorkspaceError::Remote(_)));
    let listed = workspaces::list(&d, &actor()).await.expect("list");
    assert!(listed[0].variables.is_empty());
}
