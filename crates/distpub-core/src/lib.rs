//! Core data types for distpub.
//!
//! This crate defines what a publish run operates on: the versioned
//! `distpub.toml` schema and its upgrader, publish coordinates and the
//! repository path resolver, the dist output layout, and the merge of config
//! values with command-line flags.
//!
//! This crate is intentionally free of network I/O.

pub mod config;
pub mod coordinates;
pub mod dist;
pub mod publish;
pub mod schema;
