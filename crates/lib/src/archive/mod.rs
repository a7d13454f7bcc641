//! Packaging of files into a single output.
//!
//! An [`Archive`] incrementally writes named files into an underlying sink.
//! Two formats are provided:
//!
//! - [`binary`] - Raw concatenation of the added files, no container
//! - [`targz`] - Gzip-compressed tarball

pub mod binary;
pub mod targz;

pub use binary::BinaryArchive;
pub use targz::TarGzArchive;

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// Incremental writer of named files into a packaged output.
pub trait Archive {
  /// Add the file at `path` to the archive under `name`.
  fn add(&mut self, name: &str, path: &Path) -> io::Result<()>;

  /// Flush and finish the underlying sink.
  fn close(&mut self) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveFormat {
  #[default]
  Binary,
  TarGz,
}

impl ArchiveFormat {
  pub fn as_str(self) -> &'static str {
    match self {
      ArchiveFormat::Binary => "binary",
      ArchiveFormat::TarGz => "tar.gz",
    }
  }

  /// File name extension appended to packaged artifacts, including the dot.
  pub fn extension(self) -> &'static str {
    match self {
      ArchiveFormat::Binary => "",
      ArchiveFormat::TarGz => ".tar.gz",
    }
  }
}

impl fmt::Display for ArchiveFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error)]
#[error("unsupported archive format: {0}")]
pub struct UnknownFormat(pub String);

impl FromStr for ArchiveFormat {
  type Err = UnknownFormat;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "binary" => Ok(ArchiveFormat::Binary),
      "tar.gz" | "tgz" => Ok(ArchiveFormat::TarGz),
      other => Err(UnknownFormat(other.to_string())),
    }
  }
}

/// Create an archive of the given format writing into `sink`.
pub fn new_archive<W: Write + 'static>(format: ArchiveFormat, sink: W) -> Box<dyn Archive> {
  match format {
    ArchiveFormat::Binary => Box::new(BinaryArchive::new(sink)),
    ArchiveFormat::TarGz => Box::new(TarGzArchive::new(sink)),
  }
}
