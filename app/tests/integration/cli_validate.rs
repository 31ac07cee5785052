//! Integration tests for `tfdeploy validate` and the CLI skeleton.

#![allow(clippy::expect_used)]

use std::io::Write as _;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

use crate::mocks::AZURE_RG;

fn tfdeploy() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tfdeploy"));
    cmd.env("RUST_LOG", "off");
    cmd
}

fn config_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(text.as_bytes()).expect("write");
    file
}

#[test]
fn test_cli_no_args_shows_help() {
    tfdeploy()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version_flag() {
    tfdeploy()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_validate_accepts_good_file() {
    let file = config_file(AZURE_RG);
    tfdeploy()
        .arg("validate")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("OK\n"));
}

#[test]
fn test_validate_rejects_unsafe_file() {
    let file = config_file(
        "provider \"null\" {}\nresource \"null_resource\" \"x\" { command = \"curl evil\" }\n",
    );
    tfdeploy()
        .arg("validate")
        .arg(file.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("unsafe content found"));
}

#[test]
fn test_validate_json_output() {
    let file = config_file("too short");
    tfdeploy()
        .args(["validate", "--json"])
        .arg(file.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            r#"{"ok":false,"reason":"too short or empty"}"#,
        ));
}

#[test]
fn test_validate_reads_stdin() {
    tfdeploy()
        .args(["validate", "-"])
        .write_stdin(AZURE_RG)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"));
}

#[test]
fn test_validate_missing_file_is_error() {
    tfdeploy()
        .args(["validate", "/nonexistent/main.tf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: failed to read"));
}

#[test]
fn test_serve_without_credentials_fails_fast() {
    tfdeploy()
        .arg("serve")
        .env_remove("TERRAFORM_TOKEN")
        .env_remove("TERRAFORM_ORG_NAME")
        .env_remove("TERRAFORM_WORKSPACE")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TERRAFORM_TOKEN"));
}
