//! `tfdeploy serve`: wire the infrastructure together and run the HTTP service.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::net::TcpListener;

use crate::application::ports::WorkspaceRegistry;
use crate::domain::config::AppConfig;
use crate::infra::automation::TfcClient;
use crate::infra::config::load_from_env;
use crate::infra::generator::HfGenerator;
use crate::infra::registry::{MemoryRegistry, ValkeyRegistry};
use crate::infra::session::MemorySessionStore;
use crate::web::{self, AppState};

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Listen address, overrides TFDEPLOY_LISTEN_ADDR
    #[arg(long)]
    pub listen: Option<String>,
}

/// Build the shared handler state from validated configuration.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be built or Valkey is
/// configured but unreachable.
pub async fn build_state(config: AppConfig) -> Result<Arc<AppState>> {
    let registry: Arc<dyn WorkspaceRegistry> = match &config.valkey_url {
        Some(url) => Arc::new(
            ValkeyRegistry::connect(url)
                .await
                .context("failed to initialise Valkey registry")?,
        ),
        None => {
            tracing::warn!("TFDEPLOY_VALKEY_URL not set; using in-memory registry");
            Arc::new(MemoryRegistry::new())
        }
    };

    Ok(Arc::new(AppState {
        generator: Arc::new(HfGenerator::new(&config).context("failed to build generator")?),
        automation: Arc::new(TfcClient::new(&config)?),
        registry,
        sessions: Arc::new(MemorySessionStore::new(config.session_ttl)),
        config: Arc::new(config),
    }))
}

/// Run the HTTP service until Ctrl-C.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the listener cannot bind,
/// or the server fails.
pub async fn run(args: ServeArgs) -> Result<()> {
    let mut config = load_from_env()?;
    if let Some(listen) = args.listen {
        config.listen_addr = listen;
    }

    tracing::info!(
        listen_addr = %config.listen_addr,
        organization = %config.workflow.organization,
        default_workspace = %config.workflow.default_workspace,
        workspace_policy = %config.workspace_policy,
        run_policy = %config.workflow.run_policy,
        generator_configured = config.hf_token.is_some(),
        "configuration loaded",
    );

    let listen_addr = config.listen_addr.clone();
    let state = build_state(config).await?;

    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("failed to bind TCP listener on {listen_addr}"))?;
    tracing::info!("tfdeploy ready on http://{listen_addr}");

    axum::serve(listener, web::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("tfdeploy shut down");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) for graceful shutdown.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}
