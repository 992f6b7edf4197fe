//! Command dispatch and handler modules.

mod publish;
mod upgrade_config;

use std::path::{Path, PathBuf};

use miette::Result;

use distpub_core::config::CONFIG_FILE_NAME;
use distpub_util::errors::DistError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Publish(args) => publish::exec(args),
        Command::UpgradeConfig { config } => upgrade_config::exec(config.as_deref()),
    }
}

/// The config file to use: `explicit` if given, else the nearest
/// `distpub.toml` at or above the working directory.
fn locate_config(cwd: &Path, explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(cwd.join(path));
    }
    distpub_util::fs::find_ancestor_with(cwd, CONFIG_FILE_NAME)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .ok_or_else(|| {
            DistError::Config {
                message: format!(
                    "No {CONFIG_FILE_NAME} found in {} or any parent directory",
                    cwd.display()
                ),
            }
            .into()
        })
}
