//! Checksum sidecars for uploadable artifacts.
//!
//! For every uploadable artifact a `<path>.<algorithm>sum` file is written
//! next to it, holding a single `"<hex digest>  <file name>\n"` line, and the
//! sidecar is registered as a new artifact of the same type.
//!
//! Artifacts sharing a file name get independent sidecars; nothing is
//! deduplicated.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{Outcome, Pipe, PipeError};
use crate::artifact::{Artifact, ArtifactType, by_type, or};
use crate::context::Context;
use crate::util::hash::Algorithm;

pub const DEFAULT_NAME_TEMPLATE: &str = "{{ ProjectName }}_{{ Version }}_checksums.txt";
pub const DEFAULT_ALGORITHM: &str = "sha256";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumPipe;

impl fmt::Display for ChecksumPipe {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("calculating checksums")
  }
}

impl Pipe for ChecksumPipe {
  fn default(&self, ctx: &mut Context) -> Result<(), PipeError> {
    let checksum = &mut ctx.config.checksum;
    if checksum.name_template.is_empty() {
      checksum.name_template = DEFAULT_NAME_TEMPLATE.to_string();
    }
    if checksum.algorithm.is_empty() {
      checksum.algorithm = DEFAULT_ALGORITHM.to_string();
    }
    Ok(())
  }

  fn run(&self, ctx: &mut Context) -> Result<Outcome, PipeError> {
    let artifacts = ctx.artifacts.filter(&or(vec![
      by_type(ArtifactType::UploadableArchive),
      by_type(ArtifactType::UploadableBinary),
      by_type(ArtifactType::UploadableSourceArchive),
      by_type(ArtifactType::LinuxPackage),
    ]));
    if artifacts.is_empty() {
      debug!("no artifacts to checksum");
      return Ok(Outcome::Success);
    }

    let algorithm: Algorithm = ctx
      .config
      .checksum
      .algorithm
      .parse()
      .map_err(|_| PipeError::UnsupportedAlgorithm(ctx.config.checksum.algorithm.clone()))?;

    for artifact in &artifacts {
      let sidecar = write_checksum(algorithm, artifact)?;
      ctx.artifacts.add(sidecar)?;
    }
    Ok(Outcome::Success)
  }
}

/// Write the sidecar for `artifact` and return the artifact describing it.
fn write_checksum(algorithm: Algorithm, artifact: &Artifact) -> Result<Artifact, PipeError> {
  info!(file = %artifact.name, "checksumming");
  let digest = artifact.checksum(algorithm).map_err(|source| PipeError::Checksum {
    artifact: artifact.name.clone(),
    source,
  })?;

  let suffix = format!(".{}sum", algorithm);
  let path = with_suffix(&artifact.path, &suffix);
  fs::write(&path, sidecar_line(&digest, &artifact.name)).map_err(|source| PipeError::WriteSidecar {
    artifact: artifact.name.clone(),
    path: path.display().to_string(),
    source,
  })?;

  let name = format!("{}{}", artifact.name, suffix);
  Ok(Artifact::new(artifact.artifact_type, name, path).with_extra("Checksum", algorithm.as_str()))
}

/// The single line of a sidecar file.
pub fn sidecar_line(digest: &str, name: &str) -> String {
  let base = Path::new(name)
    .file_name()
    .map(|n| n.to_string_lossy().to_string())
    .unwrap_or_else(|| name.to_string());
  format!("{}  {}\n", digest, base)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
  let mut os: OsString = path.as_os_str().to_owned();
  os.push(suffix);
  PathBuf::from(os)
}
