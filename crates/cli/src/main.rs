mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::ReleaseArgs;
use output::print_error;

/// relsmith - release artifact pipeline
#[derive(Parser)]
#[command(name = "relsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Package binaries and write checksums for a release
  Release {
    /// Files to register as built binaries
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Current release tag
    #[arg(short, long, default_value = "")]
    tag: String,

    /// Build a snapshot not tied to a release tag
    #[arg(long)]
    snapshot: bool,

    /// Continue when the tag is not a semantic version
    #[arg(long)]
    skip_validate: bool,

    /// Use the build time as the version instead of the tag
    #[arg(long)]
    synthetic_version: bool,

    /// Checksum algorithm (overrides config)
    #[arg(long)]
    algorithm: Option<String>,

    /// Archive format: binary or tar.gz (overrides config)
    #[arg(long)]
    format: Option<String>,

    /// Output directory (overrides config)
    #[arg(long)]
    dist: Option<PathBuf>,

    /// Print the artifact listing as JSON
    #[arg(long)]
    json: bool,
  },
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(e) = run(cli) {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}

fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Commands::Release {
      files,
      config,
      tag,
      snapshot,
      skip_validate,
      synthetic_version,
      algorithm,
      format,
      dist,
      json,
    } => cmd::cmd_release(ReleaseArgs {
      files,
      config,
      tag,
      snapshot,
      skip_validate,
      synthetic_version,
      algorithm,
      format,
      dist,
      json,
    }),
  }
}
