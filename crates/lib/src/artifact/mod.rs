//! Release artifacts and the registry that tracks them.
//!
//! An [`Artifact`] is a typed, named, file-backed build output. Pipes add
//! artifacts to the run's [`Artifacts`] registry and later pipes select the
//! ones they consume with [`filter`] predicates.
//!
//! # Submodules
//!
//! - [`filter`] - Predicate constructors and combinators
//! - [`registry`] - The append-only artifact registry

pub mod filter;
pub mod registry;

pub use filter::{Filter, and, by_extra, by_type, or};
pub use registry::{ArtifactError, Artifacts};

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::util::hash::{Algorithm, HashError, hash_file};

/// The kind of build output an artifact represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactType {
  /// A compiled binary, not yet packaged for upload.
  Binary,
  /// A binary ready to be uploaded as-is.
  UploadableBinary,
  /// A packaged archive ready to be uploaded.
  UploadableArchive,
  /// A source archive ready to be uploaded.
  UploadableSourceArchive,
  /// A Linux package (deb, rpm, apk).
  LinuxPackage,
  /// A checksum listing.
  Checksum,
  /// A detached signature.
  Signature,
  /// A container image.
  DockerImage,
}

impl fmt::Display for ArtifactType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      ArtifactType::Binary => "Binary",
      ArtifactType::UploadableBinary => "Uploadable Binary",
      ArtifactType::UploadableArchive => "Archive",
      ArtifactType::UploadableSourceArchive => "Source Archive",
      ArtifactType::LinuxPackage => "Linux Package",
      ArtifactType::Checksum => "Checksum",
      ArtifactType::Signature => "Signature",
      ArtifactType::DockerImage => "Docker Image",
    };
    f.write_str(s)
  }
}

/// A single build output tracked by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
  #[serde(rename = "type")]
  pub artifact_type: ArtifactType,
  pub name: String,
  pub path: PathBuf,
  /// Pipe-specific metadata, e.g. the algorithm a checksum was computed with.
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub extra: BTreeMap<String, serde_json::Value>,
}

impl Artifact {
  pub fn new(artifact_type: ArtifactType, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
    Self {
      artifact_type,
      name: name.into(),
      path: path.into(),
      extra: BTreeMap::new(),
    }
  }

  pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
    self.extra.insert(key.into(), value.into());
    self
  }

  /// Compute the digest of the artifact's file content.
  pub fn checksum(&self, algorithm: Algorithm) -> Result<String, HashError> {
    hash_file(&self.path, algorithm)
  }
}
