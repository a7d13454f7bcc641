//! Sequential pipeline execution.
//!
//! Stages run one at a time, in order. For each stage `default` is called and
//! then `run`. A skipped stage is logged at warn level and the run continues;
//! the first failure is recorded and the remaining stages are not run. Failures
//! are returned in the report rather than logged; reporting them is up to the
//! caller.

use tracing::{debug, info, warn};

use super::{Outcome, Pipe, RunReport, Stage, StageReport, StageResult};
use crate::context::Context;

#[derive(Debug, Clone)]
pub struct Pipeline {
  stages: Vec<Stage>,
}

impl Default for Pipeline {
  fn default() -> Self {
    Self::standard()
  }
}

impl Pipeline {
  pub fn new(stages: Vec<Stage>) -> Self {
    Self { stages }
  }

  /// The standard release pipeline.
  pub fn standard() -> Self {
    Self::new(Stage::standard())
  }

  pub fn stages(&self) -> &[Stage] {
    &self.stages
  }

  pub fn run(&self, ctx: &mut Context) -> RunReport {
    info!(stage_count = self.stages.len(), "starting pipeline");
    let mut report = RunReport::default();

    for stage in &self.stages {
      let name = stage.to_string();
      debug!(stage = %name, "running stage");

      let result = match stage.default(ctx).and_then(|()| stage.run(ctx)) {
        Ok(Outcome::Success) => StageResult::Success,
        Ok(Outcome::Skipped(reason)) => {
          warn!(stage = %name, reason = %reason, "stage skipped");
          StageResult::Skipped(reason)
        }
        Err(e) => {
          debug!(stage = %name, "stage failed");
          StageResult::Failed(e)
        }
      };

      let failed = matches!(result, StageResult::Failed(_));
      report.stages.push(StageReport { name, result });
      if failed {
        break;
      }
    }

    info!(
      artifacts = ctx.artifacts.len(),
      success = report.is_success(),
      "pipeline complete"
    );
    report
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::artifact::{Artifact, ArtifactType};
  use crate::pipe::{ChecksumPipe, PipeError, SemverPipe, SkipReason};
  use std::fs;

  fn release_ctx(dir: &std::path::Path, tag: &str) -> Context {
    let src = dir.join("app");
    fs::write(&src, "compiled").unwrap();

    let mut ctx = Context::default();
    ctx.git.current_tag = tag.to_string();
    ctx.config.dist = dir.join("dist");
    ctx.artifacts.add(Artifact::new(ArtifactType::Binary, "app", &src)).unwrap();
    ctx
  }

  #[test]
  fn standard_pipeline_produces_uploadable_and_checksum() {
    let temp = tempfile::tempdir().unwrap();
    let mut ctx = release_ctx(temp.path(), "v1.0.0");

    let report = Pipeline::standard().run(&mut ctx);

    assert!(report.is_success());
    assert_eq!(report.stages.len(), 3);
    assert_eq!(ctx.semver.as_ref().unwrap().major, 1);

    let types: Vec<ArtifactType> = ctx.artifacts.iter().map(|a| a.artifact_type).collect();
    assert_eq!(
      types,
      [ArtifactType::Binary, ArtifactType::UploadableBinary, ArtifactType::UploadableBinary]
    );
    assert_eq!(ctx.artifacts.list()[2].name, "app.sha256sum");
    assert!(temp.path().join("dist/app.sha256sum").exists());
  }

  #[test]
  fn skipped_stage_continues() {
    let temp = tempfile::tempdir().unwrap();
    let mut ctx = release_ctx(temp.path(), "not-a-version");
    ctx.snapshot = true;

    let report = Pipeline::standard().run(&mut ctx);

    assert!(report.is_success());
    assert!(matches!(
      report.stages[0].result,
      StageResult::Skipped(SkipReason::SnapshotEnabled)
    ));
    assert_eq!(report.stages.len(), 3);
    assert_eq!(ctx.artifacts.len(), 3);
  }

  #[test]
  fn failure_aborts_remaining_stages() {
    let temp = tempfile::tempdir().unwrap();
    let mut ctx = release_ctx(temp.path(), "not-a-version");

    let report = Pipeline::standard().run(&mut ctx);

    assert!(!report.is_success());
    assert_eq!(report.stages.len(), 1);
    let (name, err) = report.failed().unwrap();
    assert_eq!(name, "parsing tag");
    assert!(matches!(err, PipeError::InvalidTag { .. }));
    assert_eq!(ctx.artifacts.len(), 1);
    assert!(!temp.path().join("dist").exists());
  }

  #[test]
  fn custom_stage_order() {
    let temp = tempfile::tempdir().unwrap();
    let mut ctx = release_ctx(temp.path(), "v2.0.0");

    let pipeline = Pipeline::new(vec![Stage::Checksums(ChecksumPipe), Stage::Semver(SemverPipe)]);
    let report = pipeline.run(&mut ctx);

    // Checksums ran before anything was packaged, so only the binary is listed.
    assert!(report.is_success());
    assert_eq!(ctx.artifacts.len(), 1);
    assert_eq!(ctx.config.checksum.algorithm, "sha256");
    assert_eq!(pipeline.stages().len(), 2);
  }
}
