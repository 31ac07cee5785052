//! Domain types and validators for tfdeploy configuration.
//!
//! Pure functions only: no I/O, no async, no environment access. The raw
//! settings are loaded by `crate::infra::config` and validated here once at
//! startup; the resulting [`AppConfig`] is immutable for the process lifetime.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use tfdeploy_common::{PlatformSettings, ServerSettings};

use crate::domain::error::ConfigError;
use crate::domain::workspace::validate_workspace_name;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_WORKSPACE_POLICIES: &[&str] = &["plain", "auto-apply"];
pub const VALID_RUN_POLICIES: &[&str] = &["manual", "auto"];
pub const VALID_LLM_PROVIDERS: &[&str] = &["hf"];

// ── Policies ─────────────────────────────────────────────────────────────────

/// How workspaces are created on the remote side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkspacePolicy {
    /// Send only the workspace name.
    #[default]
    Plain,
    /// Also enable auto-apply and remote execution at creation time.
    AutoApply,
}

impl WorkspacePolicy {
    #[must_use]
    pub fn auto_apply(self) -> bool {
        matches!(self, Self::AutoApply)
    }
}

impl FromStr for WorkspacePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "auto-apply" => Ok(Self::AutoApply),
            other => Err(ConfigError::InvalidValue {
                key: "TFDEPLOY_WORKSPACE_POLICY",
                value: other.to_string(),
                valid: VALID_WORKSPACE_POLICIES.join(", "),
            }),
        }
    }
}

impl fmt::Display for WorkspacePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plain => "plain",
            Self::AutoApply => "auto-apply",
        })
    }
}

/// Whether queued runs apply on their own after a successful plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunPolicy {
    /// Runs wait for an explicit apply call.
    #[default]
    Manual,
    /// Runs apply automatically. Combined with the heuristic validator this
    /// lets any text that evades the denylist reach a real apply.
    Auto,
}

impl RunPolicy {
    #[must_use]
    pub fn auto_apply(self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl FromStr for RunPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "auto" => Ok(Self::Auto),
            other => Err(ConfigError::InvalidValue {
                key: "TFDEPLOY_RUN_POLICY",
                value: other.to_string(),
                valid: VALID_RUN_POLICIES.join(", "),
            }),
        }
    }
}

impl fmt::Display for RunPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Manual => "manual",
            Self::Auto => "auto",
        })
    }
}

// ── Config schema ────────────────────────────────────────────────────────────

/// Client-side timeouts for outbound calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub api: Duration,
    pub upload: Duration,
    pub generation: Duration,
}

/// Settings the plan/apply workflow reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    pub organization: String,
    pub default_workspace: String,
    pub run_policy: RunPolicy,
}

/// Validated, immutable process configuration.
#[derive(Clone)]
pub struct AppConfig {
    pub listen_addr: String,
    pub valkey_url: Option<String>,
    pub terraform_api_url: String,
    pub terraform_token: String,
    pub hf_api_url: String,
    pub hf_model: String,
    /// Checked lazily by the generator so the service can start without it.
    pub hf_token: Option<String>,
    pub workspace_policy: WorkspacePolicy,
    pub timeouts: Timeouts,
    pub session_ttl: Duration,
    pub workflow: WorkflowSettings,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("listen_addr", &self.listen_addr)
            .field("valkey_url", &self.valkey_url.as_ref().map(|_| "<set>"))
            .field("terraform_api_url", &self.terraform_api_url)
            .field("terraform_token", &"<redacted>")
            .field("hf_api_url", &self.hf_api_url)
            .field("hf_model", &self.hf_model)
            .field("hf_token", &self.hf_token.as_ref().map(|_| "<redacted>"))
            .field("workspace_policy", &self.workspace_policy)
            .field("timeouts", &self.timeouts)
            .field("session_ttl", &self.session_ttl)
            .field("workflow", &self.workflow)
            .finish()
    }
}

impl AppConfig {
    /// Validate raw settings into an `AppConfig`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required setting is missing or blank, a policy
    /// name is unknown, or a timeout is zero.
    pub fn from_settings(
        platform: PlatformSettings,
        server: ServerSettings,
    ) -> Result<Self, ConfigError> {
        if !VALID_LLM_PROVIDERS.contains(&platform.llm_provider.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "LLM_PROVIDER",
                value: platform.llm_provider,
                valid: VALID_LLM_PROVIDERS.join(", "),
            });
        }

        let terraform_token = required(platform.terraform_token, "TERRAFORM_TOKEN")?;
        let organization = required(platform.terraform_org_name, "TERRAFORM_ORG_NAME")?;
        let default_workspace = required(platform.terraform_workspace, "TERRAFORM_WORKSPACE")?;
        if validate_workspace_name(&default_workspace).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "TERRAFORM_WORKSPACE",
                value: default_workspace,
                valid: "1-90 characters of A-Z, a-z, 0-9, '_' or '-'".to_string(),
            });
        }

        let timeouts = Timeouts {
            api: positive_secs(server.api_timeout_secs, "TFDEPLOY_API_TIMEOUT_SECS")?,
            upload: positive_secs(server.upload_timeout_secs, "TFDEPLOY_UPLOAD_TIMEOUT_SECS")?,
            generation: positive_secs(
                server.generation_timeout_secs,
                "TFDEPLOY_GENERATION_TIMEOUT_SECS",
            )?,
        };
        let session_ttl = positive_secs(server.session_ttl_secs, "TFDEPLOY_SESSION_TTL_SECS")?;

        Ok(Self {
            listen_addr: server.listen_addr,
            valkey_url: server.valkey_url.filter(|url| !url.trim().is_empty()),
            terraform_api_url: server.terraform_api_url.trim_end_matches('/').to_string(),
            terraform_token,
            hf_api_url: server.hf_api_url,
            hf_model: server.hf_model,
            hf_token: platform.hf_token.filter(|t| !t.trim().is_empty()),
            workspace_policy: server.workspace_policy.parse()?,
            timeouts,
            session_ttl,
            workflow: WorkflowSettings {
                organization,
                default_workspace,
                run_policy: server.run_policy.parse()?,
            },
        })
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String, ConfigError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn positive_secs(secs: u64, key: &'static str) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            key,
            value: "0".to_string(),
            valid: "a positive number of seconds".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

// ── Unit tests ───────────────────────────────────────────────────────────────
