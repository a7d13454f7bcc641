//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the input binaries and
/// the dist output.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Write a file relative to the temp directory and return its path.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Dist directory (isolated per test).
  pub fn dist(&self) -> PathBuf {
    self.temp.path().join("dist")
  }

  /// A `relsmith release` command writing into this environment's dist.
  pub fn release_cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("relsmith");
    cmd.arg("release").arg("--dist").arg(self.dist());
    cmd
  }
}
