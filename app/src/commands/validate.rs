//! `tfdeploy validate`: run the configuration validator on a file.

use std::io::Read as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use crate::domain::validate_config;

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Configuration file to check, or `-` for stdin
    pub file: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Print the verdict; exit 0 on accept, 1 on reject.
///
/// # Errors
///
/// Returns an error if the input cannot be read.
pub fn run(args: &ValidateArgs) -> Result<ExitCode> {
    let text = if args.file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read configuration from stdin")?;
        buf
    } else {
        std::fs::read_to_string(&args.file)
            .with_context(|| format!("failed to read {}", args.file.display()))?
    };

    let result = validate_config(&text);
    if args.json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!("{}", result.reason);
    }

    Ok(if result.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
