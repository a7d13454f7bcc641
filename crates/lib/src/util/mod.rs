//! Shared utilities.
//!
//! Common utilities used across the crate, currently file hashing.

pub mod hash;
