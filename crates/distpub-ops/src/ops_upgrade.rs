//! Operation: rewrite `distpub.toml` at the latest schema version.

use std::path::Path;

use distpub_core::schema;
use distpub_util::errors::{DistError, DistResult};

/// Upgrade the config file at `path` in place.
///
/// Returns `true` if the file was rewritten. A file already at the latest
/// schema is left byte-identical, comments and formatting included.
pub fn upgrade_config_file(path: &Path) -> DistResult<bool> {
    let content = std::fs::read_to_string(path).map_err(|e| DistError::Config {
        message: format!("Failed to read {}: {e}", path.display()),
    })?;

    let (upgraded, changed) = schema::upgrade_str(&content)?;
    if !changed {
        tracing::debug!("{} is already at the latest schema", path.display());
        return Ok(false);
    }

    std::fs::write(path, upgraded).map_err(DistError::Io)?;
    tracing::info!("Upgraded {}", path.display());
    Ok(true)
}
