//! The append-only artifact registry.
//!
//! Artifacts accumulate monotonically across a run: [`Artifacts::add`] is the
//! only mutator and there is no removal. Insertion order is preserved so that
//! listings are deterministic.

use thiserror::Error;

use super::Artifact;

/// Errors from registering an artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
  #[error("artifact {name:?} has no path")]
  EmptyPath { name: String },
}

/// Ordered collection of every artifact produced during a run.
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
  items: Vec<Artifact>,
}

impl Artifacts {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append an artifact. The path must be set.
  pub fn add(&mut self, artifact: Artifact) -> Result<(), ArtifactError> {
    if artifact.path.as_os_str().is_empty() {
      return Err(ArtifactError::EmptyPath { name: artifact.name });
    }
    self.items.push(artifact);
    Ok(())
  }

  /// Return the artifacts matching `predicate`, in insertion order.
  ///
  /// The result is an owned copy, so callers may keep adding to the registry
  /// while they walk it.
  pub fn filter(&self, predicate: &dyn Fn(&Artifact) -> bool) -> Vec<Artifact> {
    self.items.iter().filter(|a| predicate(a)).cloned().collect()
  }

  pub fn list(&self) -> &[Artifact] {
    &self.items
  }

  pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
    self.items.iter()
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Serialize the full listing as pretty JSON.
  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&self.items)
  }
}
