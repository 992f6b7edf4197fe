use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use distpub_util::errors::DistError;

/// Default configuration file name, discovered by walking up from the working directory.
pub const CONFIG_FILE_NAME: &str = "distpub.toml";

/// The parsed representation of a `distpub.toml` file at schema version 0.
///
/// Keys this tool does not know about are ignored, so build and dist settings
/// for other tools may live in the same document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigV0 {
    #[serde(default, rename = "schema-version", skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,

    #[serde(default)]
    pub products: BTreeMap<String, ProductConfig>,
}

/// Per-product settings from `[products.<name>]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConfig {
    #[serde(default)]
    pub dist: DistConfig,

    #[serde(default)]
    pub publish: PublishConfig,
}

/// Where the dist step leaves built artifacts, from `[products.<name>.dist]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistConfig {
    /// OS/arch variants in build-declaration order. Empty means the host os-arch.
    #[serde(default, rename = "os-archs")]
    pub os_archs: Vec<String>,

    /// Artifact file suffix, including the leading dot.
    #[serde(default)]
    pub extension: Option<String>,
}

/// Publish settings from `[products.<name>.publish]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default, rename = "group-id")]
    pub group_id: Option<String>,

    #[serde(default)]
    pub artifactory: Option<ArtifactoryConfig>,
}

/// Repository connection settings from `[products.<name>.publish.artifactory]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactoryConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default, rename = "no-pom")]
    pub no_pom: bool,
}

impl ConfigV0 {
    /// Look up a product by name.
    pub fn product(&self, name: &str) -> miette::Result<&ProductConfig> {
        self.products.get(name).ok_or_else(|| {
            DistError::Config {
                message: format!(
                    "Unknown product '{name}' (configured: {})",
                    if self.products.is_empty() {
                        "none".to_string()
                    } else {
                        self.products.keys().cloned().collect::<Vec<_>>().join(", ")
                    }
                ),
            }
            .into()
        })
    }
}

/// Read a configuration file and upgrade it to the canonical schema.
pub fn load(path: &Path) -> miette::Result<crate::schema::Config> {
    let content = std::fs::read_to_string(path).map_err(|e| DistError::Config {
        message: format!("Failed to read {}: {e}", path.display()),
    })?;
    let raw = crate::schema::parse(&content)?;
    let (config, changed) = crate::schema::upgrade(raw);
    if changed {
        tracing::info!(
            "{} uses an older schema; run `distpub upgrade-config` to rewrite it",
            path.display()
        );
    }
    Ok(config)
}
