//! Repository authentication using the resolved publish credentials.
//!
//! Credentials come from `[products.<name>.publish.artifactory]` in
//! `distpub.toml` or from `--username` / `--password`, already merged by the
//! time a repository is built.

use reqwest::blocking::RequestBuilder;

use crate::repository::ArtifactoryRepository;

/// Apply HTTP Basic authentication to a request if the repository has credentials.
pub fn apply_auth(request: RequestBuilder, repo: &ArtifactoryRepository) -> RequestBuilder {
    if !repo.has_auth() {
        tracing::debug!("No credentials configured for repository '{}'", repo.name);
        return request;
    }
    match repo.password.as_str() {
        "" => request.basic_auth(&repo.username, None::<&str>),
        pass => request.basic_auth(&repo.username, Some(pass)),
    }
}
