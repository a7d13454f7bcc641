//! Artifact predicates.
//!
//! Predicates are plain boolean functions over a single artifact. They hold no
//! external state, so the same filter gives the same answer no matter when or
//! how often it is evaluated.

use super::{Artifact, ArtifactType};

/// A boxed artifact predicate.
pub type Filter = Box<dyn Fn(&Artifact) -> bool>;

/// Matches artifacts of exactly the given type.
pub fn by_type(artifact_type: ArtifactType) -> Filter {
  Box::new(move |a| a.artifact_type == artifact_type)
}

/// Matches artifacts whose `extra` entry for `key` equals `value`.
pub fn by_extra(key: impl Into<String>, value: impl Into<serde_json::Value>) -> Filter {
  let key = key.into();
  let value = value.into();
  Box::new(move |a| a.extra.get(&key) == Some(&value))
}

/// Matches if any of the filters match. An empty list matches nothing.
pub fn or(filters: Vec<Filter>) -> Filter {
  Box::new(move |a| filters.iter().any(|f| f(a)))
}

/// Matches if all of the filters match. An empty list matches everything.
pub fn and(filters: Vec<Filter>) -> Filter {
  Box::new(move |a| filters.iter().all(|f| f(a)))
}
