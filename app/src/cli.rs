//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Turn deployment prompts into Terraform Cloud plans
#[derive(Parser)]
#[command(
    name = "tfdeploy",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP service
    Serve(commands::serve::ServeArgs),

    /// Check a configuration file offline
    Validate(commands::validate::ValidateArgs),
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot run to completion.
    pub async fn run(self) -> Result<ExitCode> {
        match self.command {
            Command::Serve(args) => commands::serve::run(args).await.map(|()| ExitCode::SUCCESS),
            Command::Validate(args) => commands::validate::run(&args),
        }
    }
}
