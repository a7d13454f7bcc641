//! Project configuration consumed by the pipes.
//!
//! Every field deserializes with a default so partial configuration files are
//! accepted. Empty strings mean "unset"; each pipe's `default` fills the
//! fields it owns.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  pub project_name: String,
  /// Output directory for packaged artifacts.
  pub dist: PathBuf,
  pub checksum: ChecksumConfig,
  pub archive: ArchiveConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksumConfig {
  /// Template for the aggregate checksums file name. Rendered by the caller.
  pub name_template: String,
  /// Digest algorithm name, e.g. `sha256`.
  pub algorithm: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
  /// `binary` or `tar.gz`.
  pub format: String,
}
