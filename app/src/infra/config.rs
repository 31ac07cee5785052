//! Environment-backed configuration loading.
//!
//! Platform credentials come from unprefixed variables (`TERRAFORM_TOKEN`,
//! `TERRAFORM_ORG_NAME`, `TERRAFORM_WORKSPACE`, `HF_TOKEN`, `LLM_PROVIDER`);
//! server settings from `TFDEPLOY_*`. Both are read once at startup.

use anyhow::{Context, Result};
use tfdeploy_common::{PlatformSettings, ServerSettings};

use crate::domain::config::AppConfig;

/// Prefix of server settings variables.
pub const SERVER_ENV_PREFIX: &str = "TFDEPLOY_";

/// Load and validate configuration from the process environment.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
pub fn load_from_env() -> Result<AppConfig> {
    let platform: PlatformSettings = envy::from_env()
        .context("failed to load platform settings (TERRAFORM_*, HF_TOKEN, LLM_PROVIDER)")?;
    let server: ServerSettings = envy::prefixed(SERVER_ENV_PREFIX)
        .from_env()
        .context("failed to load server settings from TFDEPLOY_* env vars")?;
    AppConfig::from_settings(platform, server).context("invalid configuration")
}

/// Load and validate configuration from explicit `(NAME, value)` pairs.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
pub fn load_from_iter<I>(vars: I) -> Result<AppConfig>
where
    I: IntoIterator<Item = (String, String)>,
{
    let vars: Vec<(String, String)> = vars.into_iter().collect();
    let platform: PlatformSettings =
        envy::from_iter(vars.iter().cloned()).context("failed to load platform settings")?;
    let server: ServerSettings = envy::prefixed(SERVER_ENV_PREFIX)
        .from_iter(vars)
        .context("failed to load server settings")?;
    AppConfig::from_settings(platform, server).context("invalid configuration")
}
