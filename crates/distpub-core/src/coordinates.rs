//! Repository coordinates and the Maven-layout path resolver.

use std::path::{Path, PathBuf};

use distpub_util::errors::DistError;

/// The `(group, artifact, version)` triple identifying a publishable unit.
///
/// Construction rejects empty components, so every value of this type can be
/// turned into a repository path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishCoordinates {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl PublishCoordinates {
    /// Validate and build coordinates. The version is opaque (no semver parsing).
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> miette::Result<Self> {
        let coords = Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        };
        for (field, value) in [
            ("group-id", &coords.group_id),
            ("artifact-id", &coords.artifact_id),
            ("version", &coords.version),
        ] {
            if value.is_empty() {
                return Err(DistError::InvalidCoordinates {
                    field: field.to_string(),
                }
                .into());
            }
        }
        Ok(coords)
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// `com.test.group` becomes `com/test/group`.
    pub fn group_path(&self) -> String {
        self.group_id.replace('.', "/")
    }

    /// `{artifact}-{version}`, the stem shared by every file of this unit.
    pub fn base_name(&self) -> String {
        format!("{}-{}", self.artifact_id, self.version)
    }

    /// `{groupPath}/{artifact}/{version}`, the directory holding every file of this unit.
    pub fn version_dir(&self) -> String {
        format!("{}/{}/{}", self.group_path(), self.artifact_id, self.version)
    }
}

/// One built artifact of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactVariant {
    /// OS/arch tag such as `linux-amd64`; `None` for single-variant products.
    pub os_arch: Option<String>,
    /// Local path of the built file.
    pub file_path: PathBuf,
}

impl ArtifactVariant {
    pub fn new(os_arch: Option<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            os_arch: os_arch.filter(|tag| !tag.is_empty()),
            file_path: file_path.into(),
        }
    }
}

/// Repository-relative path of a variant:
/// `{groupPath}/{artifact}/{version}/{artifact}-{version}[-{osArch}]{ext}`.
pub fn resolve_path(coords: &PublishCoordinates, variant: &ArtifactVariant) -> String {
    let base_name = coords.base_name();
    let extension = file_extension_of(&variant.file_path, &base_name);
    let file_name = match &variant.os_arch {
        Some(tag) => format!("{base_name}-{tag}{extension}"),
        None => format!("{base_name}{extension}"),
    };
    format!("{}/{}", coords.version_dir(), file_name)
}

/// Repository-relative path of the POM: `{groupPath}/{artifact}/{version}/{artifact}-{version}.pom`.
pub fn resolve_descriptor_path(coords: &PublishCoordinates) -> String {
    format!("{}/{}.pom", coords.version_dir(), coords.base_name())
}

/// Suffix of a local artifact file, taken verbatim.
///
/// When the file name starts with `base_name`, everything from the first `.`
/// after that prefix is the extension, so `foo-1.0.0-linux-amd64.tar.gz`
/// yields `.tar.gz`, and a name with no `.` after the prefix has no
/// extension. Otherwise the suffix starts at the last `.` of the name.
pub fn file_extension_of(path: &Path, base_name: &str) -> String {
    let name = distpub_util::fs::file_name_str(path);
    if let Some(rest) = name.strip_prefix(base_name) {
        return rest.find('.').map(|idx| rest[idx..].to_string()).unwrap_or_default();
    }
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords() -> PublishCoordinates {
        PublishCoordinates::new("com.test.group", "foo", "1.0.0").unwrap()
    }

    #[test]
    fn group_path_replaces_dots() {
        assert_eq!(coords().group_path(), "com/test/group");
    }

    #[test]
    fn resolve_tagged_variant() {
        let variant = ArtifactVariant::new(
            Some("linux-amd64".to_string()),
            "out/dist/foo/1.0.0/os-arch-bin/foo-1.0.0-linux-amd64.tgz",
        );
        assert_eq!(
            resolve_path(&coords(), &variant),
            "com/test/group/foo/1.0.0/foo-1.0.0-linux-amd64.tgz"
        );
    }

    #[test]
    fn resolve_untagged_variant() {
        let variant = ArtifactVariant::new(None, "build/foo-1.0.0.tgz");
        assert_eq!(
            resolve_path(&coords(), &variant),
            "com/test/group/foo/1.0.0/foo-1.0.0.tgz"
        );
    }

    #[test]
    fn empty_tag_is_treated_as_untagged() {
        let variant = ArtifactVariant::new(Some(String::new()), "build/foo-1.0.0.tgz");
        assert_eq!(variant.os_arch, None);
    }

    #[test]
    fn resolve_descriptor() {
        assert_eq!(
            resolve_descriptor_path(&coords()),
            "com/test/group/foo/1.0.0/foo-1.0.0.pom"
        );
    }

    #[test]
    fn extension_keeps_compound_suffix() {
        let ext = file_extension_of(
            Path::new("out/foo-1.0.0-linux-amd64.tar.gz"),
            "foo-1.0.0",
        );
        assert_eq!(ext, ".tar.gz");
    }

    #[test]
    fn extensionless_file_never_borrows_version_dots() {
        assert_eq!(file_extension_of(Path::new("out/foo-1.0.0"), "foo-1.0.0"), "");
        assert_eq!(
            file_extension_of(Path::new("out/foo-1.0.0-linux-amd64"), "foo-1.0.0"),
            ""
        );
        assert_eq!(
            resolve_path(&coords(), &ArtifactVariant::new(None, "out/foo-1.0.0")),
            "com/test/group/foo/1.0.0/foo-1.0.0"
        );
        assert_eq!(
            resolve_path(
                &coords(),
                &ArtifactVariant::new(Some("linux-amd64".to_string()), "out/foo-1.0.0-linux-amd64"),
            ),
            "com/test/group/foo/1.0.0/foo-1.0.0-linux-amd64"
        );
    }

    #[test]
    fn extension_without_matching_prefix_uses_last_dot() {
        assert_eq!(file_extension_of(Path::new("dist/bundle.zip"), "foo-1.0.0"), ".zip");
        assert_eq!(file_extension_of(Path::new("dist/bundle"), "foo-1.0.0"), "");
        assert_eq!(file_extension_of(Path::new("dist/.hidden"), "foo-1.0.0"), "");
    }

    #[test]
    fn empty_components_are_rejected() {
        for (g, a, v, field) in [
            ("", "foo", "1.0.0", "group-id"),
            ("com.x", "", "1.0.0", "artifact-id"),
            ("com.x", "foo", "", "version"),
        ] {
            let err = PublishCoordinates::new(g, a, v).unwrap_err();
            match err.downcast_ref::<DistError>() {
                Some(DistError::InvalidCoordinates { field: f }) => assert_eq!(f, field),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
