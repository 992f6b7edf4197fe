//! Shared utilities for distpub.
//!
//! This crate provides cross-cutting concerns used by all other distpub crates:
//! the unified error type, filesystem helpers, digest computation for upload
//! checksums, and terminal status output.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod progress;
