//! Versioned configuration schema and the upgrade chain into the canonical shape.
//!
//! The schema version lives in an integer `schema-version` key at the root of
//! `distpub.toml`. A missing key means version 0. Each schema version has its
//! own variant in [`VersionedConfig`]; a new version is added by appending a
//! variant and a step to [`upgrade`] and [`upgrade_document`], never by
//! changing an existing variant.

use std::fmt;

use toml_edit::DocumentMut;

use distpub_util::errors::DistError;

use crate::config::ConfigV0;

/// Key holding the schema discriminator at the document root.
pub const SCHEMA_VERSION_KEY: &str = "schema-version";

/// The highest schema version this build can read.
const CURRENT_MAX: u32 = 0;

/// The canonical (current) configuration shape.
pub type Config = ConfigV0;

/// A validated configuration schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaVersion(u32);

impl SchemaVersion {
    /// Return the current (latest) schema version.
    pub fn current() -> Self {
        Self(CURRENT_MAX)
    }

    /// Return the inner version number.
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Read the discriminator from a parsed TOML value.
    ///
    /// `None` (key absent) is version 0. Anything that is not a non-negative
    /// integer within range is rejected.
    fn from_discriminator(value: Option<&toml::Value>) -> miette::Result<Self> {
        match value {
            None => Ok(Self(0)),
            Some(toml::Value::Integer(n)) => {
                let n = u32::try_from(*n).map_err(|_| unsupported(n.to_string()))?;
                Ok(Self::try_from(n)?)
            }
            Some(other) => Err(unsupported(other.to_string()).into()),
        }
    }
}

impl TryFrom<u32> for SchemaVersion {
    type Error = DistError;

    fn try_from(value: u32) -> Result<Self, DistError> {
        if value > CURRENT_MAX {
            return Err(unsupported(value.to_string()));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn unsupported(value: String) -> DistError {
    DistError::UnsupportedSchemaVersion {
        value,
        max: CURRENT_MAX,
    }
}

/// A configuration as read from disk, tagged with its schema version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionedConfig {
    V0(ConfigV0),
}

impl VersionedConfig {
    pub fn schema_version(&self) -> SchemaVersion {
        match self {
            Self::V0(_) => SchemaVersion(0),
        }
    }
}

impl From<Config> for VersionedConfig {
    fn from(config: Config) -> Self {
        Self::V0(config)
    }
}

/// Parse a configuration document, dispatching on its schema version.
pub fn parse(content: &str) -> miette::Result<VersionedConfig> {
    let table: toml::Table = content.parse().map_err(|e| DistError::Config {
        message: format!("Failed to parse distpub.toml: {e}"),
    })?;

    let version = SchemaVersion::from_discriminator(table.get(SCHEMA_VERSION_KEY))?;
    match version.as_u32() {
        0 => {
            let config: ConfigV0 =
                toml::Value::Table(table)
                    .try_into()
                    .map_err(|e| DistError::Config {
                        message: format!("Invalid distpub.toml: {e}"),
                    })?;
            Ok(VersionedConfig::V0(config))
        }
        _ => Err(unsupported(version.to_string()).into()),
    }
}

/// Upgrade a configuration value to the canonical schema.
///
/// Returns the canonical value and whether anything had to change. Values
/// (URLs, credentials, repository names) are never altered, only moved.
/// Applying `upgrade` to its own output always reports `false`.
pub fn upgrade(raw: VersionedConfig) -> (Config, bool) {
    match raw {
        VersionedConfig::V0(config) => (config, false),
    }
}

/// Upgrade a configuration document in place, preserving comments and layout.
///
/// Returns `true` if the document was modified.
pub fn upgrade_document(doc: &mut DocumentMut) -> miette::Result<bool> {
    let discriminator = match doc.get(SCHEMA_VERSION_KEY) {
        None => None,
        Some(item) => Some(
            item.as_value()
                .map(item_to_value)
                .unwrap_or_else(|| toml::Value::String(item.to_string().trim().to_string())),
        ),
    };
    let version = SchemaVersion::from_discriminator(discriminator.as_ref())?;

    match version.as_u32() {
        // Version 0 is already the canonical layout.
        0 => Ok(false),
        _ => Err(unsupported(version.to_string()).into()),
    }
}

/// Upgrade a configuration document held as text.
///
/// Returns the (possibly rewritten) text and whether it changed. When nothing
/// changes, the input is returned byte-for-byte.
pub fn upgrade_str(content: &str) -> miette::Result<(String, bool)> {
    let mut doc: DocumentMut = content.parse().map_err(|e| DistError::Config {
        message: format!("Failed to parse distpub.toml: {e}"),
    })?;

    let changed = upgrade_document(&mut doc)?;
    if changed {
        Ok((doc.to_string(), true))
    } else {
        Ok((content.to_string(), false))
    }
}

fn item_to_value(value: &toml_edit::Value) -> toml::Value {
    match value {
        toml_edit::Value::Integer(i) => toml::Value::Integer(*i.value()),
        other => toml::Value::String(other.to_string().trim().to_string()),
    }
}
