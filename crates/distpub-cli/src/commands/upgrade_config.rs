//! Handler for `distpub upgrade-config`.

use std::path::Path;

use miette::Result;

use distpub_ops::ops_upgrade;
use distpub_util::errors::DistError;

pub fn exec(config: Option<&Path>) -> Result<()> {
    let cwd = std::env::current_dir().map_err(DistError::Io)?;
    let config_path = super::locate_config(&cwd, config)?;

    if ops_upgrade::upgrade_config_file(&config_path)? {
        distpub_util::progress::status("Upgraded", &config_path.display().to_string());
    }
    Ok(())
}
