//! Gzip-compressed tarball archive.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use super::Archive;

pub struct TarGzArchive<W: Write> {
  builder: Option<tar::Builder<GzEncoder<W>>>,
  sink: Option<W>,
}

impl<W: Write> TarGzArchive<W> {
  pub fn new(sink: W) -> Self {
    Self {
      builder: Some(tar::Builder::new(GzEncoder::new(sink, Compression::default()))),
      sink: None,
    }
  }

  /// The finished sink, available once the archive has been closed.
  pub fn into_inner(self) -> Option<W> {
    self.sink
  }
}

impl<W: Write> Archive for TarGzArchive<W> {
  fn add(&mut self, name: &str, path: &Path) -> io::Result<()> {
    let builder = self
      .builder
      .as_mut()
      .ok_or_else(|| io::Error::other("archive is already closed"))?;

    if fs::metadata(path)?.is_dir() {
      return builder.append_dir(name, path);
    }
    let mut file = File::open(path)?;
    builder.append_file(name, &mut file)
  }

  /// Writes the tar trailer and the gzip footer. Closing twice is a no-op.
  fn close(&mut self) -> io::Result<()> {
    let Some(builder) = self.builder.take() else {
      return Ok(());
    };
    let mut sink = builder.into_inner()?.finish()?;
    sink.flush()?;
    self.sink = Some(sink);
    Ok(())
  }
}
