//! Operation: publish a product's built artifacts and POM to Artifactory.
//!
//! Publishing runs in three steps: resolve the effective settings (config
//! merged with flags), plan every upload (pure path and URL math), then
//! execute the plan in order or, in dry-run mode, only report it.

use std::io::Write;
use std::path::PathBuf;

use distpub_core::coordinates::{
    file_extension_of, resolve_descriptor_path, resolve_path, ArtifactVariant, PublishCoordinates,
};
use distpub_core::dist::DistLayout;
use distpub_core::publish::{resolve_effective, PublishFlags, PublishOptions, RepositoryTarget};
use distpub_core::schema::Config;
use distpub_maven::checksum::checksum_headers;
use distpub_maven::pom;
use distpub_maven::repository::ArtifactoryRepository;
use distpub_maven::upload::{HttpTransport, UploadRequest, UploadTransport};
use distpub_util::errors::{DistError, DistResult};

const DRY_RUN_PREFIX: &str = "[DRY RUN] ";

/// What a planned upload sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    /// A built artifact read from disk at upload time.
    File(PathBuf),
    /// The generated POM.
    Descriptor(Vec<u8>),
}

/// A single PUT, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUpload {
    pub source: UploadSource,
    pub repo_path: String,
    pub url: String,
}

impl PlannedUpload {
    /// The line reported for this upload.
    pub fn report_line(&self, dry_run: bool) -> String {
        let prefix = if dry_run { DRY_RUN_PREFIX } else { "" };
        match &self.source {
            UploadSource::File(path) => {
                format!("{prefix}Uploading {} to {}", path.display(), self.url)
            }
            UploadSource::Descriptor(_) => format!("{prefix}Uploading to {}", self.url),
        }
    }
}

/// Every upload of a publish run: artifacts in declaration order, POM last.
#[derive(Debug, Clone, Default)]
pub struct UploadPlan {
    pub uploads: Vec<PlannedUpload>,
}

/// Outcome of a successful publish run.
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub coords: PublishCoordinates,
    pub repository_url: String,
    /// Number of PUTs performed; zero for a dry run.
    pub uploaded: usize,
    pub dry_run: bool,
}

/// Resolve settings for `product`, locate its dist artifacts and publish them.
///
/// Report lines are written to `out` as each upload starts.
pub fn publish(
    config: &Config,
    product: &str,
    version: &str,
    flags: &PublishFlags,
    layout: &DistLayout,
    out: &mut dyn Write,
) -> DistResult<PublishReport> {
    let product_config = config.product(product)?;
    let effective = resolve_effective(product, version, product_config, flags)?;
    let variants = layout.variants(product, version, &product_config.dist);
    let opts = &effective.options;
    let repo = ArtifactoryRepository::from_target(&effective.target);

    let uploaded = if opts.dry_run {
        let plan = plan_uploads(&effective.coords, &variants, &repo, opts)?;
        report_plan(&plan, out)?;
        0
    } else {
        repo.validate()?;
        let transport = HttpTransport::new(repo.clone())?;
        publish_artifacts(&effective.coords, &variants, &effective.target, opts, &transport, out)?
            .len()
    };

    Ok(PublishReport {
        repository_url: repo.repository_url(),
        uploaded,
        dry_run: opts.dry_run,
        coords: effective.coords,
    })
}

/// Publish already-located variants of one coordinate to `target`.
///
/// Artifacts go up in the given order, followed by the POM unless
/// `opts.no_pom`. Returns the report lines, which are also written to `out`.
pub fn publish_artifacts(
    coords: &PublishCoordinates,
    variants: &[ArtifactVariant],
    target: &RepositoryTarget,
    opts: &PublishOptions,
    transport: &dyn UploadTransport,
    out: &mut dyn Write,
) -> DistResult<Vec<String>> {
    let repo = ArtifactoryRepository::from_target(target);
    let plan = plan_uploads(coords, variants, &repo, opts)?;
    execute_plan(&plan, opts, transport, out)
}

/// Compute every upload without touching the filesystem or network.
pub fn plan_uploads(
    coords: &PublishCoordinates,
    variants: &[ArtifactVariant],
    repo: &ArtifactoryRepository,
    opts: &PublishOptions,
) -> DistResult<UploadPlan> {
    repo.validate()?;

    let mut uploads: Vec<PlannedUpload> = variants
        .iter()
        .map(|variant| {
            let repo_path = resolve_path(coords, variant);
            PlannedUpload {
                source: UploadSource::File(variant.file_path.clone()),
                url: repo.file_url(&repo_path),
                repo_path,
            }
        })
        .collect();

    if !opts.no_pom {
        let extension = variants
            .first()
            .map(|v| file_extension_of(&v.file_path, &coords.base_name()))
            .unwrap_or_default();
        let descriptor = pom::build_descriptor(coords, pom::packaging_for_extension(&extension))?;
        let repo_path = resolve_descriptor_path(coords);
        uploads.push(PlannedUpload {
            source: UploadSource::Descriptor(descriptor),
            url: repo.file_url(&repo_path),
            repo_path,
        });
    }

    for upload in &uploads {
        tracing::debug!("Planned upload {}", upload.url);
    }
    Ok(UploadPlan { uploads })
}

/// Run a plan strictly in order, stopping at the first failure.
///
/// With `opts.dry_run` this only reports the plan and `transport` is never
/// called. Uploads completed before a failure stay on the server. Returns the
/// report lines.
pub fn execute_plan(
    plan: &UploadPlan,
    opts: &PublishOptions,
    transport: &dyn UploadTransport,
    out: &mut dyn Write,
) -> DistResult<Vec<String>> {
    if opts.dry_run {
        return report_plan(plan, out);
    }

    let mut lines = Vec::with_capacity(plan.uploads.len());
    for upload in &plan.uploads {
        lines.push(announce(upload, false, out)?);

        let body = match &upload.source {
            UploadSource::File(path) => std::fs::read(path).map_err(DistError::Io)?,
            UploadSource::Descriptor(bytes) => bytes.clone(),
        };
        let headers = if opts.checksums {
            checksum_headers(&body)
        } else {
            Vec::new()
        };
        let request = UploadRequest {
            url: upload.url.clone(),
            body,
            headers,
        };

        let sp = distpub_util::progress::spinner(&format!("Uploading {}", upload.repo_path));
        let result = transport.put(&request);
        sp.finish_and_clear();

        result.map_err(|e| DistError::UploadFailed {
            url: upload.url.clone(),
            cause: e.to_string(),
        })?;
    }

    Ok(lines)
}

/// Write the dry-run line of every planned upload without any network I/O.
pub fn report_plan(plan: &UploadPlan, out: &mut dyn Write) -> DistResult<Vec<String>> {
    plan.uploads
        .iter()
        .map(|upload| announce(upload, true, out))
        .collect()
}

/// Check that an artifact is on disk, then write its report line.
fn announce(upload: &PlannedUpload, dry_run: bool, out: &mut dyn Write) -> DistResult<String> {
    if let UploadSource::File(path) = &upload.source {
        if !path.is_file() {
            return Err(DistError::MissingArtifactFile {
                path: path.display().to_string(),
            }
            .into());
        }
    }
    let line = upload.report_line(dry_run);
    writeln!(out, "{line}").map_err(DistError::Io)?;
    Ok(line)
}
