//! Artifactory repository protocol: URL layout, POM synthesis, checksum
//! headers, authentication, and the upload transport.

pub mod auth;
pub mod checksum;
pub mod pom;
pub mod repository;
pub mod upload;
