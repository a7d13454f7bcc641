//! Uncompressed "binary" archive.
//!
//! Streams the bytes of each added file into the sink in the order added. The
//! entry name is ignored; there is no container format.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use super::Archive;

pub struct BinaryArchive<W: Write> {
  sink: W,
}

impl<W: Write> BinaryArchive<W> {
  pub fn new(sink: W) -> Self {
    Self { sink }
  }

  pub fn into_inner(self) -> W {
    self.sink
  }
}

impl<W: Write> Archive for BinaryArchive<W> {
  /// Directories are skipped without writing anything. Open and read errors
  /// are returned unchanged.
  fn add(&mut self, _name: &str, path: &Path) -> io::Result<()> {
    let mut file = File::open(path)?;
    if file.metadata()?.is_dir() {
      return Ok(());
    }
    io::copy(&mut file, &mut self.sink)?;
    Ok(())
  }

  fn close(&mut self) -> io::Result<()> {
    self.sink.flush()
  }
}
