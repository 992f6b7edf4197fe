//! CLI argument definitions for distpub.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "distpub",
    version,
    about = "Publish distribution artifacts to Artifactory",
    long_about = "distpub uploads the per-OS/arch archives produced by a dist step to an \
                  Artifactory repository in Maven layout, together with a minimal POM."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Publish a product's dist artifacts
    Publish(PublishArgs),

    /// Rewrite distpub.toml at the latest schema version
    UpgradeConfig {
        /// Path to the config file (default: nearest distpub.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Product to publish, as named under [products] in distpub.toml
    pub product: String,

    /// Version being published
    #[arg(long = "product-version")]
    pub product_version: String,

    /// Path to the config file (default: nearest distpub.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dist output directory (default: out/dist next to the config file)
    #[arg(long)]
    pub dist_dir: Option<PathBuf>,

    /// Print the uploads that would happen without performing them
    #[arg(long)]
    pub dry_run: bool,

    /// Maven group ID (overrides config)
    #[arg(long)]
    pub group_id: Option<String>,

    /// Artifactory base URL (overrides config)
    #[arg(long)]
    pub url: Option<String>,

    /// Artifactory username (overrides config)
    #[arg(long)]
    pub username: Option<String>,

    /// Artifactory password (overrides config)
    #[arg(long, env = "DISTPUB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Artifactory repository (overrides config)
    #[arg(long)]
    pub repository: Option<String>,

    /// Do not generate or upload a POM
    #[arg(long)]
    pub no_pom: bool,

    /// Do not send X-Checksum headers
    #[arg(long)]
    pub no_checksums: bool,
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}
