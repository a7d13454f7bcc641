//! Run state shared by every pipe.
//!
//! A [`Context`] is created once per invocation, handed to each pipe as
//! `&mut Context`, and dropped at the end of the run. Nothing persists across
//! runs. Targets built in parallel must each own a separate context.

use serde::Serialize;

use crate::artifact::Artifacts;
use crate::config::Config;

/// VCS information resolved before the pipeline starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitInfo {
  pub current_tag: String,
}

/// Structured view of a parsed release tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Semver {
  pub major: u64,
  pub minor: u64,
  pub patch: u64,
  /// Empty when the tag has no prerelease part.
  pub prerelease: String,
}

/// A timestamp-derived version used instead of a parsed tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntheticVersion {
  /// RFC 3339 build time, e.g. `2024-01-01T10:00:00Z`.
  pub version: String,
  /// Tag-safe form, e.g. `RELEASE.2024-01-01T10-00-00Z`.
  pub release_tag: String,
}

#[derive(Debug, Default)]
pub struct Context {
  pub config: Config,
  pub artifacts: Artifacts,
  pub git: GitInfo,
  /// Set by the version pipe when the current tag parses.
  pub semver: Option<Semver>,
  /// Set by the version pipe in synthetic-version mode.
  pub synthetic: Option<SyntheticVersion>,
  /// The build is not tied to a real release tag.
  pub snapshot: bool,
  pub skip_validate: bool,
  pub generate_synthetic_version: bool,
}

impl Context {
  pub fn new(config: Config) -> Self {
    Self {
      config,
      ..Self::default()
    }
  }

  /// The version string of this run: the synthetic build time when one was
  /// generated, otherwise the current tag without a leading `v`.
  pub fn version(&self) -> &str {
    match &self.synthetic {
      Some(synthetic) => &synthetic.version,
      None => self.git.current_tag.strip_prefix('v').unwrap_or(&self.git.current_tag),
    }
  }
}
