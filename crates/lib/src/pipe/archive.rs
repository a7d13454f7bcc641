//! Packaging of built binaries into uploadable artifacts.
//!
//! Each `Binary` artifact is written into the dist directory using the
//! configured [`ArchiveFormat`]. The `binary` format copies the file as-is and
//! registers an `UploadableBinary`; `tar.gz` wraps it in a tarball and
//! registers an `UploadableArchive`.

use std::collections::HashSet;
use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{Outcome, Pipe, PipeError};
use crate::archive::{ArchiveFormat, new_archive};
use crate::artifact::{Artifact, ArtifactType, by_type};
use crate::context::Context;

pub const DEFAULT_DIST: &str = "dist";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchivePipe;

impl fmt::Display for ArchivePipe {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("archives")
  }
}

impl Pipe for ArchivePipe {
  fn default(&self, ctx: &mut Context) -> Result<(), PipeError> {
    if ctx.config.archive.format.is_empty() {
      ctx.config.archive.format = ArchiveFormat::default().to_string();
    }
    if ctx.config.dist.as_os_str().is_empty() {
      ctx.config.dist = PathBuf::from(DEFAULT_DIST);
    }
    Ok(())
  }

  fn run(&self, ctx: &mut Context) -> Result<Outcome, PipeError> {
    let binaries = ctx.artifacts.filter(&by_type(ArtifactType::Binary));
    if binaries.is_empty() {
      debug!("no binaries to archive");
      return Ok(Outcome::Success);
    }

    let format: ArchiveFormat = ctx
      .config
      .archive
      .format
      .parse()
      .map_err(|_| PipeError::UnsupportedFormat(ctx.config.archive.format.clone()))?;

    let dist = ctx.config.dist.clone();
    fs::create_dir_all(&dist).map_err(|source| PipeError::CreateDir {
      path: dist.display().to_string(),
      source,
    })?;

    let mut targets = HashSet::new();
    for binary in &binaries {
      let packaged = packaged_artifact(format, binary, &dist);
      if !targets.insert(packaged.path.clone()) {
        return Err(PipeError::DuplicateTarget {
          artifact: binary.name.clone(),
          path: packaged.path.display().to_string(),
        });
      }
      write_archive(format, binary, &packaged.path)?;
      ctx.artifacts.add(packaged)?;
    }
    Ok(Outcome::Success)
  }
}

fn file_name(binary: &Artifact) -> String {
  Path::new(&binary.name)
    .file_name()
    .map(|n| n.to_string_lossy().to_string())
    .unwrap_or_else(|| binary.name.clone())
}

fn packaged_artifact(format: ArchiveFormat, binary: &Artifact, dist: &Path) -> Artifact {
  let name = format!("{}{}", file_name(binary), format.extension());
  let target = dist.join(&name);
  let artifact_type = match format {
    ArchiveFormat::Binary => ArtifactType::UploadableBinary,
    ArchiveFormat::TarGz => ArtifactType::UploadableArchive,
  };
  Artifact::new(artifact_type, name, target).with_extra("Format", format.as_str())
}

fn write_archive(format: ArchiveFormat, binary: &Artifact, target: &Path) -> Result<(), PipeError> {
  // Truncating the target would destroy a binary that already lives in dist.
  if target == binary.path.as_path() {
    debug!(file = %binary.name, "binary already in dist");
    return Ok(());
  }

  info!(file = %binary.name, format = %format, "archiving");
  let wrap = |source: io::Error| PipeError::Archive {
    artifact: binary.name.clone(),
    source,
  };
  let mut archive = new_archive(format, File::create(target).map_err(wrap)?);
  let written = archive.add(&file_name(binary), &binary.path).and_then(|()| archive.close());
  drop(archive);
  if let Err(source) = written {
    if let Err(e) = fs::remove_file(target) {
      debug!(path = %target.display(), error = %e, "failed to remove partial archive");
    }
    return Err(wrap(source));
  }
  Ok(())
}
