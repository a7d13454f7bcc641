//! CLI smoke tests for relsmith.
//!
//! These tests verify that the CLI parses its arguments and returns
//! appropriate exit codes.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Get a Command for the relsmith binary.
fn relsmith_cmd() -> Command {
  cargo_bin_cmd!("relsmith")
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  relsmith_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  relsmith_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("relsmith"));
}

#[test]
fn release_help_works() {
  relsmith_cmd()
    .args(["release", "--help"])
    .assert()
    .success()
    .stdout(predicate::str::contains("--skip-validate"));
}

#[test]
fn release_requires_files() {
  relsmith_cmd()
    .arg("release")
    .assert()
    .failure()
    .stderr(predicate::str::contains("FILES"));
}
