//! File digests for artifact checksums.
//!
//! This module provides:
//! - `Algorithm`: the digest algorithms a checksum can be computed with
//! - `hash_file()`: streaming digest of a file's contents
//! - `hash_bytes()`: digest of an in-memory buffer

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

const BUFFER_SIZE: usize = 8192;

/// A digest algorithm usable for checksum sidecars.
///
/// Names are matched case-sensitively against the lowercase spelling used in
/// configuration files and sidecar extensions (`sha256` -> `.sha256sum`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
  Md5,
  Sha1,
  Sha224,
  Sha256,
  Sha384,
  Sha512,
  Blake3,
}

impl Algorithm {
  pub const ALL: [Algorithm; 7] = [
    Algorithm::Md5,
    Algorithm::Sha1,
    Algorithm::Sha224,
    Algorithm::Sha256,
    Algorithm::Sha384,
    Algorithm::Sha512,
    Algorithm::Blake3,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Algorithm::Md5 => "md5",
      Algorithm::Sha1 => "sha1",
      Algorithm::Sha224 => "sha224",
      Algorithm::Sha256 => "sha256",
      Algorithm::Sha384 => "sha384",
      Algorithm::Sha512 => "sha512",
      Algorithm::Blake3 => "blake3",
    }
  }
}

impl fmt::Display for Algorithm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Errors from computing a digest.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
  #[error("unsupported checksum algorithm: {0}")]
  UnsupportedAlgorithm(String),

  #[error("failed to read file {path}: {source}")]
  ReadFile {
    path: String,
    #[source]
    source: io::Error,
  },
}

impl FromStr for Algorithm {
  type Err = HashError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Algorithm::ALL
      .into_iter()
      .find(|alg| alg.as_str() == s)
      .ok_or_else(|| HashError::UnsupportedAlgorithm(s.to_string()))
  }
}

/// Hash a file's contents with the given algorithm.
///
/// Returns the lowercase hexadecimal digest. The file is read in fixed-size
/// chunks and closed before returning, on success and on error.
pub fn hash_file(path: &Path, algorithm: Algorithm) -> Result<String, HashError> {
  let file = fs::File::open(path).map_err(|source| HashError::ReadFile {
    path: path.display().to_string(),
    source,
  })?;

  hash_reader(file, algorithm).map_err(|source| HashError::ReadFile {
    path: path.display().to_string(),
    source,
  })
}

/// Hash arbitrary bytes with the given algorithm.
pub fn hash_bytes(data: &[u8], algorithm: Algorithm) -> String {
  // Reading from a slice cannot fail.
  hash_reader(data, algorithm).unwrap_or_default()
}

fn hash_reader(reader: impl Read, algorithm: Algorithm) -> io::Result<String> {
  match algorithm {
    Algorithm::Md5 => digest_reader::<Md5>(reader),
    Algorithm::Sha1 => digest_reader::<Sha1>(reader),
    Algorithm::Sha224 => digest_reader::<Sha224>(reader),
    Algorithm::Sha256 => digest_reader::<Sha256>(reader),
    Algorithm::Sha384 => digest_reader::<Sha384>(reader),
    Algorithm::Sha512 => digest_reader::<Sha512>(reader),
    Algorithm::Blake3 => {
      let mut hasher = blake3::Hasher::new();
      for_each_chunk(reader, |chunk| {
        hasher.update(chunk);
      })?;
      Ok(hasher.finalize().to_hex().to_string())
    }
  }
}

fn digest_reader<D: Digest>(reader: impl Read) -> io::Result<String> {
  let mut hasher = D::new();
  for_each_chunk(reader, |chunk| hasher.update(chunk))?;
  Ok(hex::encode(hasher.finalize()))
}

fn for_each_chunk(mut reader: impl Read, mut f: impl FnMut(&[u8])) -> io::Result<()> {
  let mut buffer = [0u8; BUFFER_SIZE];
  loop {
    let bytes_read = reader.read(&mut buffer)?;
    if bytes_read == 0 {
      return Ok(());
    }
    f(&buffer[..bytes_read]);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;
  use tempfile::NamedTempFile;

  const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

  #[test]
  fn hash_bytes_sha256() {
    assert_eq!(hash_bytes(b"hello world", Algorithm::Sha256), HELLO_SHA256);
  }

  #[test]
  fn hash_bytes_legacy_algorithms() {
    assert_eq!(hash_bytes(b"hello world", Algorithm::Md5), "5eb63bbbe01eeed093cb22bb8f5acdc3");
    assert_eq!(
      hash_bytes(b"hello world", Algorithm::Sha1),
      "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
    );
  }

  #[test]
  fn hash_file_matches_hash_bytes() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"hello world").unwrap();
    file.flush().unwrap();

    for alg in Algorithm::ALL {
      let hash = hash_file(file.path(), alg).unwrap();
      assert_eq!(hash, hash_bytes(b"hello world", alg), "mismatch for {alg}");
    }
  }

  #[test]
  fn digest_lengths() {
    assert_eq!(hash_bytes(b"", Algorithm::Md5).len(), 32);
    assert_eq!(hash_bytes(b"", Algorithm::Sha1).len(), 40);
    assert_eq!(hash_bytes(b"", Algorithm::Sha224).len(), 56);
    assert_eq!(hash_bytes(b"", Algorithm::Sha256).len(), 64);
    assert_eq!(hash_bytes(b"", Algorithm::Sha384).len(), 96);
    assert_eq!(hash_bytes(b"", Algorithm::Sha512).len(), 128);
    assert_eq!(hash_bytes(b"", Algorithm::Blake3).len(), 64);
  }

  #[test]
  fn hash_spans_multiple_chunks() {
    let data = vec![7u8; BUFFER_SIZE * 3 + 11];
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&data).unwrap();
    file.flush().unwrap();

    assert_eq!(
      hash_file(file.path(), Algorithm::Sha256).unwrap(),
      hash_bytes(&data, Algorithm::Sha256)
    );
  }

  #[test]
  fn parse_algorithm_names() {
    assert_eq!("sha256".parse::<Algorithm>().unwrap(), Algorithm::Sha256);
    assert_eq!("blake3".parse::<Algorithm>().unwrap(), Algorithm::Blake3);
    assert_eq!("sha1".parse::<Algorithm>().unwrap(), Algorithm::Sha1);
    assert_eq!("md5".parse::<Algorithm>().unwrap(), Algorithm::Md5);
    assert!(matches!(
      "md4".parse::<Algorithm>(),
      Err(HashError::UnsupportedAlgorithm(name)) if name == "md4"
    ));
  }

  #[test]
  fn missing_file_reports_path() {
    let err = hash_file(Path::new("/nonexistent/relsmith/file"), Algorithm::Sha256).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/relsmith/file"));
  }
}
