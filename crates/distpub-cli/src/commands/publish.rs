//! Handler for `distpub publish`.

use std::path::{Path, PathBuf};

use miette::Result;

use distpub_core::dist::{DistLayout, DEFAULT_DIST_DIR};
use distpub_core::publish::PublishFlags;
use distpub_ops::ops_publish;
use distpub_util::errors::DistError;

use crate::cli::PublishArgs;

pub fn exec(args: PublishArgs) -> Result<()> {
    let cwd = std::env::current_dir().map_err(DistError::Io)?;
    let config_path = super::locate_config(&cwd, args.config.as_deref())?;
    let config = distpub_core::config::load(&config_path)?;

    let layout = DistLayout::new(dist_dir(&cwd, &config_path, args.dist_dir));
    let flags = PublishFlags {
        group_id: args.group_id,
        url: args.url,
        username: args.username,
        password: args.password,
        repository: args.repository,
        no_pom: args.no_pom,
        dry_run: args.dry_run,
        no_checksums: args.no_checksums,
    };

    let mut stdout = std::io::stdout().lock();
    let report = ops_publish::publish(
        &config,
        &args.product,
        &args.product_version,
        &flags,
        &layout,
        &mut stdout,
    )?;

    if !report.dry_run {
        distpub_util::progress::status(
            "Published",
            &format!(
                "{} {} to {} ({} file{})",
                report.coords.artifact_id(),
                report.coords.version(),
                report.repository_url,
                report.uploaded,
                if report.uploaded == 1 { "" } else { "s" }
            ),
        );
    }
    Ok(())
}

/// Resolve the dist directory.
///
/// An explicit `--dist-dir` is taken relative to the working directory.
/// Otherwise `out/dist` sits next to the config file, and stays relative
/// when that is the working directory so reported paths read naturally.
fn dist_dir(cwd: &Path, config_path: &Path, explicit: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    match config_path.parent() {
        Some(root) if root != cwd => root.join(DEFAULT_DIST_DIR),
        _ => PathBuf::from(DEFAULT_DIST_DIR),
    }
}
