//! Release version resolution.
//!
//! In the default mode the current tag is parsed as a semantic version and
//! exposed on the context. In synthetic-version mode the build time stands in
//! for the version and a tag-safe release tag is derived from it.

use std::fmt;

use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};

use super::{Outcome, Pipe, PipeError, SkipReason};
use crate::context::{Context, Semver, SyntheticVersion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemverPipe;

impl fmt::Display for SemverPipe {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("parsing tag")
  }
}

impl Pipe for SemverPipe {
  fn run(&self, ctx: &mut Context) -> Result<Outcome, PipeError> {
    if ctx.generate_synthetic_version {
      let version = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
      let release_tag = release_tag(ctx.snapshot, &version);
      info!(version = %version, release_tag = %release_tag, "generated synthetic version");
      ctx.git.current_tag = release_tag.clone();
      ctx.synthetic = Some(SyntheticVersion { version, release_tag });
      return Ok(Outcome::Success);
    }

    let tag = &ctx.git.current_tag;
    match parse_tag(tag) {
      Ok(version) => {
        ctx.semver = Some(Semver {
          major: version.major,
          minor: version.minor,
          patch: version.patch,
          prerelease: version.pre.as_str().to_string(),
        });
        Ok(Outcome::Success)
      }
      Err(_) if ctx.snapshot => Ok(Outcome::Skipped(SkipReason::SnapshotEnabled)),
      Err(e) if ctx.skip_validate => {
        warn!(tag = %tag, error = %e, "current tag is not a semantic tag");
        Ok(Outcome::Skipped(SkipReason::SkipValidateEnabled))
      }
      Err(source) => Err(PipeError::InvalidTag {
        tag: tag.clone(),
        source,
      }),
    }
  }
}

/// Derive a tag-safe release tag from a version string.
///
/// Spaces and colons become `-` and commas are dropped. The prefix is
/// `DEVELOPMENT.` for snapshot builds and `RELEASE.` otherwise.
pub fn release_tag(snapshot: bool, version: &str) -> String {
  let prefix = if snapshot { "DEVELOPMENT" } else { "RELEASE" };
  let tag = version.replace([' ', ':'], "-").replace(',', "");
  format!("{}.{}", prefix, tag)
}

/// Parse a tag as a semantic version, allowing a leading `v`.
///
/// Missing minor and patch numbers default to zero, so `v1.2` parses as
/// `1.2.0` and `1` as `1.0.0`.
fn parse_tag(tag: &str) -> Result<semver::Version, semver::Error> {
  let version = tag.strip_prefix('v').unwrap_or(tag);
  let core_end = version.find(['-', '+']).unwrap_or(version.len());
  let (core, suffix) = version.split_at(core_end);
  let missing = 2usize.saturating_sub(core.matches('.').count());
  semver::Version::parse(&format!("{}{}{}", core, ".0".repeat(missing), suffix))
}
