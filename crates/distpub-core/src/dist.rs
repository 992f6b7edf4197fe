//! Location of built artifacts in the dist output directory.
//!
//! The dist step writes one archive per OS/arch into
//! `{dist-dir}/{product}/{version}/os-arch-bin/{product}-{version}-{os-arch}{ext}`.

use std::path::{Path, PathBuf};

use crate::config::DistConfig;
use crate::coordinates::ArtifactVariant;

/// Default dist output directory, relative to the project root.
pub const DEFAULT_DIST_DIR: &str = "out/dist";

/// Default artifact suffix for OS/arch archives.
pub const DEFAULT_EXTENSION: &str = ".tgz";

const DISTER_DIR: &str = "os-arch-bin";

/// Dist output layout rooted at a directory.
#[derive(Debug, Clone)]
pub struct DistLayout {
    pub dist_dir: PathBuf,
}

impl DistLayout {
    pub fn new(dist_dir: impl Into<PathBuf>) -> Self {
        Self {
            dist_dir: dist_dir.into(),
        }
    }

    /// Path of the archive for one OS/arch variant.
    pub fn artifact_path(
        &self,
        product: &str,
        version: &str,
        os_arch: &str,
        extension: &str,
    ) -> PathBuf {
        self.dist_dir
            .join(product)
            .join(version)
            .join(DISTER_DIR)
            .join(format!("{product}-{version}-{os_arch}{extension}"))
    }

    /// The product's variants in declaration order.
    ///
    /// Without declared os-archs the host os-arch is the single variant.
    pub fn variants(&self, product: &str, version: &str, dist: &DistConfig) -> Vec<ArtifactVariant> {
        let extension = dist.extension.as_deref().unwrap_or(DEFAULT_EXTENSION);
        let os_archs = if dist.os_archs.is_empty() {
            vec![host_os_arch()]
        } else {
            dist.os_archs.clone()
        };
        os_archs
            .into_iter()
            .map(|os_arch| {
                let path = self.artifact_path(product, version, &os_arch, extension);
                ArtifactVariant::new(Some(os_arch), path)
            })
            .collect()
    }
}

impl Default for DistLayout {
    fn default() -> Self {
        Self::new(Path::new(DEFAULT_DIST_DIR))
    }
}

/// The running host as `{os}-{arch}` using Go naming (`linux-amd64`, `darwin-arm64`).
pub fn host_os_arch() -> String {
    format!("{}-{}", go_os(std::env::consts::OS), go_arch(std::env::consts::ARCH))
}

fn go_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

fn go_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "powerpc64" => "ppc64",
        other => other,
    }
}
