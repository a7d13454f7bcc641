//! relsmith-lib: Core types and logic for relsmith
//!
//! This crate provides the artifact pipeline of a release build:
//! - `Artifact`: typed, file-backed build outputs tracked in an append-only registry
//! - `Context`: the single-owner run state every pipe reads and mutates
//! - `Pipe`: the two-phase `default`/`run` contract and the sequential runner
//! - `Archive`: incremental packaging of files into an output sink

pub mod archive;
pub mod artifact;
pub mod config;
pub mod context;
pub mod pipe;
pub mod util;
