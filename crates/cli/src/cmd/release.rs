//! Implementation of the `relsmith release` command.
//!
//! Registers the given files as built binaries, runs the standard pipeline
//! (version resolution, packaging, checksums) and prints what was produced.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};
use tracing::info;

use relsmith_lib::artifact::{Artifact, ArtifactType};
use relsmith_lib::config::Config;
use relsmith_lib::context::Context;
use relsmith_lib::pipe::{Pipeline, StageResult};

use crate::output::{print_info, print_stat, print_success, print_warning, symbols};

pub struct ReleaseArgs {
  pub files: Vec<PathBuf>,
  pub config: Option<PathBuf>,
  pub tag: String,
  pub snapshot: bool,
  pub skip_validate: bool,
  pub synthetic_version: bool,
  pub algorithm: Option<String>,
  pub format: Option<String>,
  pub dist: Option<PathBuf>,
  pub json: bool,
}

pub fn cmd_release(args: ReleaseArgs) -> Result<()> {
  let mut config = match &args.config {
    Some(path) => load_config(path)?,
    None => Config::default(),
  };
  if let Some(algorithm) = args.algorithm {
    config.checksum.algorithm = algorithm;
  }
  if let Some(format) = args.format {
    config.archive.format = format;
  }
  if let Some(dist) = args.dist {
    config.dist = dist;
  }

  let mut ctx = Context::new(config);
  ctx.git.current_tag = args.tag;
  ctx.snapshot = args.snapshot;
  ctx.skip_validate = args.skip_validate;
  ctx.generate_synthetic_version = args.synthetic_version;

  for file in &args.files {
    let name = file
      .file_name()
      .map(|n| n.to_string_lossy().to_string())
      .unwrap_or_else(|| file.display().to_string());
    ctx
      .artifacts
      .add(Artifact::new(ArtifactType::Binary, name, file))
      .with_context(|| format!("Failed to register {}", file.display()))?;
  }
  info!(binaries = ctx.artifacts.len(), "registered binaries");

  let report = Pipeline::standard().run(&mut ctx);

  if args.json {
    println!("{}", ctx.artifacts.to_json().context("Failed to serialize artifacts")?);
  } else {
    for stage in &report.stages {
      match &stage.result {
        StageResult::Success => print_success(&stage.name),
        StageResult::Skipped(reason) => print_warning(&format!("{} {} {}", stage.name, symbols::ARROW, reason)),
        StageResult::Failed(_) => {}
      }
    }
    print_summary(&ctx);
  }

  if let Some((name, err)) = report.failed() {
    bail!("{} failed: {}", name, err);
  }
  Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read config: {}", path.display()))?;
  serde_json::from_str(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
}

fn print_summary(ctx: &Context) {
  println!();
  if let Some(semver) = &ctx.semver {
    let mut version = format!("{}.{}.{}", semver.major, semver.minor, semver.patch);
    if !semver.prerelease.is_empty() {
      version.push('-');
      version.push_str(&semver.prerelease);
    }
    print_stat("Version", &version);
  }
  if let Some(synthetic) = &ctx.synthetic {
    print_stat("Version", &synthetic.version);
    print_stat("Release tag", &synthetic.release_tag);
  }
  print_stat("Artifacts", &ctx.artifacts.len().to_string());
  for artifact in ctx.artifacts.iter() {
    print_info(&format!("{} ({})", artifact.path.display(), artifact.artifact_type));
  }
}
