//! Outcome and error types for pipe execution.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::artifact::ArtifactError;
use crate::util::hash::HashError;

/// Why a stage chose not to do its work.
///
/// A skip is not a failure: the runner logs it and moves on to the next stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// Snapshot builds are not tied to a release tag.
  SnapshotEnabled,
  /// Validation was turned off; a warning has already been logged.
  SkipValidateEnabled,
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SkipReason::SnapshotEnabled => f.write_str("disabled during snapshot mode"),
      SkipReason::SkipValidateEnabled => f.write_str("validation is disabled"),
    }
  }
}

/// Result of a pipe run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  Success,
  Skipped(SkipReason),
}

/// Errors that abort the pipeline.
#[derive(Debug, Error)]
pub enum PipeError {
  /// The current tag is not a semantic version and no override flag is set.
  #[error("failed to parse tag {tag} as semver: {source}")]
  InvalidTag {
    tag: String,
    #[source]
    source: ::semver::Error,
  },

  #[error("unsupported checksum algorithm: {0}")]
  UnsupportedAlgorithm(String),

  #[error("unsupported archive format: {0}")]
  UnsupportedFormat(String),

  /// Reading an artifact for its digest failed.
  #[error("failed to checksum {artifact}: {source}")]
  Checksum {
    artifact: String,
    #[source]
    source: HashError,
  },

  #[error("failed to write checksum for {artifact} to {path}: {source}")]
  WriteSidecar {
    artifact: String,
    path: String,
    #[source]
    source: io::Error,
  },

  #[error("failed to create directory {path}: {source}")]
  CreateDir {
    path: String,
    #[source]
    source: io::Error,
  },

  #[error("failed to archive {artifact}: {source}")]
  Archive {
    artifact: String,
    #[source]
    source: io::Error,
  },

  #[error("{artifact} would overwrite {path}, already packaged from another binary")]
  DuplicateTarget { artifact: String, path: String },

  #[error("registry error: {0}")]
  Registry(#[from] ArtifactError),
}

/// What happened to a single stage in a run.
#[derive(Debug)]
pub enum StageResult {
  Success,
  Skipped(SkipReason),
  Failed(PipeError),
}

#[derive(Debug)]
pub struct StageReport {
  /// Human-readable stage name, as printed in progress output.
  pub name: String,
  pub result: StageResult,
}

/// Result of running a pipeline.
///
/// Stages after a failure are not run and do not appear in the report.
#[derive(Debug, Default)]
pub struct RunReport {
  pub stages: Vec<StageReport>,
}

impl RunReport {
  /// Returns true if no stage failed. Skipped stages count as success.
  pub fn is_success(&self) -> bool {
    self.failed().is_none()
  }

  /// The stage that aborted the run, if any.
  pub fn failed(&self) -> Option<(&str, &PipeError)> {
    self.stages.iter().find_map(|s| match &s.result {
      StageResult::Failed(err) => Some((s.name.as_str(), err)),
      _ => None,
    })
  }

  pub fn skipped(&self) -> impl Iterator<Item = (&str, SkipReason)> {
    self.stages.iter().filter_map(|s| match s.result {
      StageResult::Skipped(reason) => Some((s.name.as_str(), reason)),
      _ => None,
    })
  }
}
