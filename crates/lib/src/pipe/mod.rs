//! Pipeline stages and their execution.
//!
//! A pipe is one stage of a release. Every pipe implements the two-phase
//! [`Pipe`] contract against the shared [`Context`]:
//!
//! 1. `default` fills configuration fields the pipe owns that are still unset
//! 2. `run` does the work, reading and extending the artifact registry
//!
//! The set of stages is closed: [`Stage`] has one variant per known pipe and
//! [`Stage::standard`] fixes their order. New pipes are added by extending the
//! enum.
//!
//! # Submodules
//!
//! - [`archive`] - Packages binaries into uploadable artifacts
//! - [`checksums`] - Writes checksum sidecars for uploadable artifacts
//! - [`runner`] - Sequential execution with skip/abort semantics
//! - [`semver`] - Resolves the release version

pub mod archive;
pub mod checksums;
pub mod runner;
pub mod semver;
mod types;

pub use archive::ArchivePipe;
pub use checksums::ChecksumPipe;
pub use runner::Pipeline;
pub use semver::SemverPipe;
pub use types::*;

use std::fmt;

use crate::context::Context;

/// The contract every pipeline stage implements.
///
/// `Display` provides the name used in logs and progress output.
pub trait Pipe: fmt::Display {
  /// Fill unset configuration with defaults. Must be idempotent and must never
  /// overwrite a value that is already set.
  fn default(&self, _ctx: &mut Context) -> Result<(), PipeError> {
    Ok(())
  }

  /// Do the stage's work.
  fn run(&self, ctx: &mut Context) -> Result<Outcome, PipeError>;
}

/// Every known pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Semver(SemverPipe),
  Archive(ArchivePipe),
  Checksums(ChecksumPipe),
}

impl Stage {
  /// The stages of a release, in execution order.
  pub fn standard() -> Vec<Stage> {
    vec![
      Stage::Semver(SemverPipe),
      Stage::Archive(ArchivePipe),
      Stage::Checksums(ChecksumPipe),
    ]
  }

  fn pipe(&self) -> &dyn Pipe {
    match self {
      Stage::Semver(p) => p,
      Stage::Archive(p) => p,
      Stage::Checksums(p) => p,
    }
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(self.pipe(), f)
  }
}

impl Pipe for Stage {
  fn default(&self, ctx: &mut Context) -> Result<(), PipeError> {
    self.pipe().default(ctx)
  }

  fn run(&self, ctx: &mut Context) -> Result<Outcome, PipeError> {
    self.pipe().run(ctx)
  }
}
