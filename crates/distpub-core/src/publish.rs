//! Effective publish settings: config file values merged with command-line flags.

use crate::config::ProductConfig;
use crate::coordinates::PublishCoordinates;

/// Connection parameters for the target repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryTarget {
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub repository: String,
}

/// Switches controlling what a publish run does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOptions {
    /// Skip generating and uploading the POM.
    pub no_pom: bool,
    /// Print the planned uploads instead of performing them.
    pub dry_run: bool,
    /// Send `X-Checksum-*` headers with every PUT.
    pub checksums: bool,
}

impl Default for PublishOptions {
    fn default() -> Self {
        Self {
            no_pom: false,
            dry_run: false,
            checksums: true,
        }
    }
}

/// Values given on the command line. `None` means the flag was not passed.
#[derive(Debug, Clone, Default)]
pub struct PublishFlags {
    pub group_id: Option<String>,
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub repository: Option<String>,
    pub no_pom: bool,
    pub dry_run: bool,
    pub no_checksums: bool,
}

/// Fully resolved, immutable input to a publish run.
#[derive(Debug, Clone)]
pub struct EffectivePublish {
    pub coords: PublishCoordinates,
    pub target: RepositoryTarget,
    pub options: PublishOptions,
}

/// Merge a product's configuration with command-line flags.
///
/// Each field resolves on its own: the flag if given, else the config file,
/// else the empty default. Fails with `InvalidCoordinates` when the group ID,
/// product name or version ends up empty.
pub fn resolve_effective(
    product_name: &str,
    version: &str,
    product: &ProductConfig,
    flags: &PublishFlags,
) -> miette::Result<EffectivePublish> {
    let artifactory = product.publish.artifactory.clone().unwrap_or_default();

    let pick = |flag: &Option<String>, file: Option<String>| -> String {
        flag.clone().or(file).unwrap_or_default()
    };

    let group_id = pick(&flags.group_id, product.publish.group_id.clone());
    let coords = PublishCoordinates::new(group_id, product_name, version)?;

    let target = RepositoryTarget {
        base_url: pick(&flags.url, artifactory.url),
        username: pick(&flags.username, artifactory.username),
        password: pick(&flags.password, artifactory.password),
        repository: pick(&flags.repository, artifactory.repository),
    };

    let options = PublishOptions {
        no_pom: flags.no_pom || artifactory.no_pom,
        dry_run: flags.dry_run,
        checksums: !flags.no_checksums,
    };

    Ok(EffectivePublish {
        coords,
        target,
        options,
    })
}
