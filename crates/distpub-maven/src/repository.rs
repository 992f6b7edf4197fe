//! Artifactory repository abstraction: URL layout and connection settings.

use distpub_core::coordinates::{resolve_descriptor_path, resolve_path, ArtifactVariant, PublishCoordinates};
use distpub_core::publish::RepositoryTarget;
use distpub_util::errors::DistError;

/// Path segment Artifactory serves repositories under.
pub const ARTIFACTORY_CONTEXT: &str = "artifactory";

/// A configured Artifactory repository with credentials.
#[derive(Debug, Clone)]
pub struct ArtifactoryRepository {
    pub name: String,
    pub url: String,
    pub username: String,
    pub password: String,
}

impl ArtifactoryRepository {
    /// Build a repository from resolved publish settings.
    ///
    /// Trailing slashes on the base URL and surrounding slashes on the
    /// repository name are dropped so composed URLs contain exactly one
    /// separator between segments.
    pub fn from_target(target: &RepositoryTarget) -> Self {
        let name = target.repository.trim_matches('/').to_string();
        if name.contains('/') {
            tracing::warn!("Repository name '{name}' contains '/'");
        }
        Self {
            name,
            url: target.base_url.trim_end_matches('/').to_string(),
            username: target.username.clone(),
            password: target.password.clone(),
        }
    }

    /// Fail unless both the base URL and repository name are set.
    pub fn validate(&self) -> miette::Result<()> {
        if self.url.is_empty() {
            return Err(DistError::Config {
                message: "Artifactory URL is not set (use `url` in distpub.toml or --url)"
                    .to_string(),
            }
            .into());
        }
        if self.name.is_empty() {
            return Err(DistError::Config {
                message:
                    "Artifactory repository is not set (use `repository` in distpub.toml or --repository)"
                        .to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// `{base}/artifactory/{repository}`
    pub fn repository_url(&self) -> String {
        format!("{}/{}/{}", self.url, ARTIFACTORY_CONTEXT, self.name)
    }

    /// Full URL of a repository-relative path.
    pub fn file_url(&self, repo_path: &str) -> String {
        format!("{}/{}", self.repository_url(), repo_path.trim_start_matches('/'))
    }

    /// Full URL of a variant's archive.
    pub fn artifact_url(&self, coords: &PublishCoordinates, variant: &ArtifactVariant) -> String {
        self.file_url(&resolve_path(coords, variant))
    }

    /// Full URL of the POM for a coordinate.
    pub fn pom_url(&self, coords: &PublishCoordinates) -> String {
        self.file_url(&resolve_descriptor_path(coords))
    }

    /// Whether this repository has authentication configured.
    pub fn has_auth(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(base_url: &str, repository: &str) -> RepositoryTarget {
        RepositoryTarget {
            base_url: base_url.to_string(),
            username: "testUsername".to_string(),
            password: "testPassword".to_string(),
            repository: repository.to_string(),
        }
    }

    fn coords() -> PublishCoordinates {
        PublishCoordinates::new("com.test.group", "foo", "1.0.0").unwrap()
    }

    #[test]
    fn artifact_url_format() {
        let repo = ArtifactoryRepository::from_target(&target("http://artifactory.domain.com", "testRepo"));
        let variant = ArtifactVariant::new(
            Some("darwin-amd64".to_string()),
            "out/dist/foo/1.0.0/os-arch-bin/foo-1.0.0-darwin-amd64.tgz",
        );
        assert_eq!(
            repo.artifact_url(&coords(), &variant),
            "http://artifactory.domain.com/artifactory/testRepo/com/test/group/foo/1.0.0/foo-1.0.0-darwin-amd64.tgz"
        );
    }

    #[test]
    fn pom_url_format() {
        let repo = ArtifactoryRepository::from_target(&target("http://artifactory.domain.com", "testRepo"));
        assert_eq!(
            repo.pom_url(&coords()),
            "http://artifactory.domain.com/artifactory/testRepo/com/test/group/foo/1.0.0/foo-1.0.0.pom"
        );
    }

    #[test]
    fn trailing_slashes_are_normalized() {
        let plain = ArtifactoryRepository::from_target(&target("http://a.example.com", "repo"));
        let slashed = ArtifactoryRepository::from_target(&target("http://a.example.com//", "/repo/"));
        assert_eq!(plain.pom_url(&coords()), slashed.pom_url(&coords()));
        assert_eq!(slashed.file_url("/x/y.tgz"), "http://a.example.com/artifactory/repo/x/y.tgz");
    }

    #[test]
    fn validate_requires_url_and_repository() {
        assert!(ArtifactoryRepository::from_target(&target("", "repo")).validate().is_err());
        assert!(ArtifactoryRepository::from_target(&target("http://a", "")).validate().is_err());
        assert!(ArtifactoryRepository::from_target(&target("http://a", "repo")).validate().is_ok());
    }

    #[test]
    fn has_auth() {
        let mut repo = ArtifactoryRepository::from_target(&target("http://a", "repo"));
        assert!(repo.has_auth());
        repo.username.clear();
        repo.password.clear();
        assert!(!repo.has_auth());
    }
}
