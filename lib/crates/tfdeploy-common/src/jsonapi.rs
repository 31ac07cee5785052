//! JSON:API payloads exchanged with the Terraform Cloud API.
//!
//! Request bodies are built with the constructors at the bottom of this
//! module; response bodies deserialize only the fields the client reads.

use serde::{Deserialize, Serialize};

/// JSON:API resource type names.
pub mod resource_type {
    pub const WORKSPACES: &str = "workspaces";
    pub const CONFIGURATION_VERSIONS: &str = "configuration-versions";
    pub const RUNS: &str = "runs";
    pub const VARS: &str = "vars";
}

/// Message attached to every run queued by tfdeploy.
pub const RUN_MESSAGE: &str = "AI-generated plan";

/// Execution mode set on workspaces created under the auto-apply policy.
pub const REMOTE_EXECUTION_MODE: &str = "remote";

/// Top-level `{"data": ...}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

// ── Requests ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct NewResource<A> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: A,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Relationships>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Relationships {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Relationship>,
    #[serde(
        rename = "configuration-version",
        skip_serializing_if = "Option::is_none"
    )]
    pub configuration_version: Option<Relationship>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Relationship {
    pub data: ResourceRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceRef {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceAttributes {
    pub name: String,
    #[serde(rename = "auto-apply", skip_serializing_if = "Option::is_none")]
    pub auto_apply: Option<bool>,
    #[serde(rename = "execution-mode", skip_serializing_if = "Option::is_none")]
    pub execution_mode: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationVersionAttributes {
    #[serde(rename = "auto-queue-runs")]
    pub auto_queue_runs: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunAttributes {
    pub message: &'static str,
    #[serde(rename = "auto-apply")]
    pub auto_apply: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariableAttributes {
    pub key: String,
    pub value: String,
    pub category: &'static str,
    pub hcl: bool,
    pub sensitive: bool,
}

// ── Responses ────────────────────────────────────────────────────────────────

/// Any response where only the resource id matters.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceId {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigurationVersionData {
    pub id: String,
    pub attributes: ConfigurationVersionState,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigurationVersionState {
    #[serde(rename = "upload-url")]
    pub upload_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceData {
    pub id: String,
    pub attributes: WorkspaceName,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceName {
    pub name: String,
}

/// Permissions document; every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionsDocument {
    #[serde(default)]
    pub data: PermissionsData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionsData {
    #[serde(default)]
    pub attributes: PermissionsAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PermissionsAttributes {
    #[serde(rename = "can-queue-apply", default)]
    pub can_queue_apply: bool,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Body for `POST /organizations/{org}/workspaces`.
///
/// With `auto_apply` the workspace is created with `auto-apply: true` and
/// remote execution; otherwise only the name is sent.
pub fn new_workspace(name: &str, auto_apply: bool) -> Document<NewResource<WorkspaceAttributes>> {
    Document {
        data: NewResource {
            kind: resource_type::WORKSPACES,
            attributes: WorkspaceAttributes {
                name: name.to_string(),
                auto_apply: auto_apply.then_some(true),
                execution_mode: auto_apply.then_some(REMOTE_EXECUTION_MODE),
            },
            relationships: None,
        },
    }
}

/// Body for `POST /workspaces/{id}/configuration-versions`.
pub fn new_configuration_version(
    auto_queue_runs: bool,
) -> Document<NewResource<ConfigurationVersionAttributes>> {
    Document {
        data: NewResource {
            kind: resource_type::CONFIGURATION_VERSIONS,
            attributes: ConfigurationVersionAttributes { auto_queue_runs },
            relationships: None,
        },
    }
}

/// Body for `POST /runs`.
pub fn new_run(
    workspace_id: &str,
    configuration_version_id: &str,
    auto_apply: bool,
) -> Document<NewResource<RunAttributes>> {
    Document {
        data: NewResource {
            kind: resource_type::RUNS,
            attributes: RunAttributes {
                message: RUN_MESSAGE,
                auto_apply,
            },
            relationships: Some(Relationships {
                workspace: Some(Relationship {
                    data: ResourceRef {
                        kind: resource_type::WORKSPACES,
                        id: workspace_id.to_string(),
                    },
                }),
                configuration_version: Some(Relationship {
                    data: ResourceRef {
                        kind: resource_type::CONFIGURATION_VERSIONS,
                        id: configuration_version_id.to_string(),
                    },
                }),
            }),
        },
    }
}

/// Body for `POST /workspaces/{id}/vars`. Always a plain Terraform variable.
pub fn new_variable(
    key: &str,
    value: &str,
    sensitive: bool,
) -> Document<NewResource<VariableAttributes>> {
    Document {
        data: NewResource {
            kind: resource_type::VARS,
            attributes: VariableAttributes {
                key: key.to_string(),
                value: value.to_string(),
                category: "terraform",
                hcl: false,
                sensitive,
            },
            relationships: None,
        },
    }
}
