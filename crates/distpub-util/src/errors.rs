use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all distpub operations.
#[derive(Debug, Error, Diagnostic)]
pub enum DistError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed configuration file.
    #[error("Config error: {message}")]
    #[diagnostic(help("Check distpub.toml for syntax errors"))]
    Config { message: String },

    /// The configuration declares a schema version this build cannot read.
    #[error("Unsupported config schema version {value} (latest supported is {max})")]
    #[diagnostic(help("Upgrade distpub or set `schema-version` to a supported value"))]
    UnsupportedSchemaVersion { value: String, max: u32 },

    /// Group ID, artifact ID or version is missing.
    #[error("Invalid publish coordinates: {field} must not be empty")]
    #[diagnostic(help("Set it in distpub.toml or pass it on the command line"))]
    InvalidCoordinates { field: String },

    /// A declared artifact was not found on disk at publish time.
    #[error("Artifact file does not exist: {path}")]
    #[diagnostic(help("Run the dist step before publishing"))]
    MissingArtifactFile { path: String },

    /// A PUT to the repository failed. Uploads before it are not rolled back.
    #[error("upload to {url} failed: {cause}")]
    UploadFailed { url: String, cause: String },

    /// HTTP client setup or other network-level failure.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type DistResult<T> = miette::Result<T>;
