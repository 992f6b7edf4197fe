//! Checksum headers attached to uploads (SHA-1, SHA-256, MD5).
//!
//! Artifactory compares these against the received body and rejects the
//! deploy on mismatch. Nothing is verified after the upload completes.

use distpub_util::hash::{md5_bytes, sha1_bytes, sha256_bytes};

pub const SHA1_HEADER: &str = "X-Checksum-Sha1";
pub const SHA256_HEADER: &str = "X-Checksum-Sha256";
pub const MD5_HEADER: &str = "X-Checksum";

/// Header name/value pairs carrying the body's digests.
pub fn checksum_headers(data: &[u8]) -> Vec<(&'static str, String)> {
    vec![
        (SHA1_HEADER, sha1_bytes(data)),
        (SHA256_HEADER, sha256_bytes(data)),
        (MD5_HEADER, md5_bytes(data)),
    ]
}
