//! Maven repository directory layout.
//!
//! Maps a coordinate (`group:artifact:version`) onto the conventional
//! `group/as/path/artifact/version/` tree beneath a staging root and names
//! every file the run produces.

use crate::packaging::PackagingKind;
use camino::{Utf8Path, Utf8PathBuf};
use std::path::MAIN_SEPARATOR;

/// File name of the repository metadata descriptor.
pub const METADATA_FILE_NAME: &str = "maven-metadata.xml";

/// Compute the metadata and version directories for a coordinate.
///
/// `group_id` is split on `.` and each segment becomes a nested directory
/// below `root`, followed by `artifact_id` (the metadata directory) and
/// `version` (the version directory). Identifiers are not sanitized.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use maven_repackager::layout::repository_dirs;
///
/// let (metadata_dir, version_dir) =
///     repository_dirs(Utf8Path::new("out"), "com.example.lib", "foo", "1.2.3");
/// assert_eq!(metadata_dir, Utf8Path::new("out/com/example/lib/foo"));
/// assert_eq!(version_dir, Utf8Path::new("out/com/example/lib/foo/1.2.3"));
/// ```
#[must_use]
pub fn repository_dirs(
    root: &Utf8Path,
    group_id: &str,
    artifact_id: &str,
    version: &str,
) -> (Utf8PathBuf, Utf8PathBuf) {
    let mut metadata_dir = root.as_str().to_owned();
    for segment in group_id.split('.') {
        append_segment(&mut metadata_dir, segment);
    }
    append_segment(&mut metadata_dir, artifact_id);

    let mut version_dir = metadata_dir.clone();
    append_segment(&mut version_dir, version);

    (Utf8PathBuf::from(metadata_dir), Utf8PathBuf::from(version_dir))
}

// Textual append keeps a segment with a leading separator beneath the root,
// where `PathBuf::push` would replace the whole path.
fn append_segment(path: &mut String, segment: &str) {
    path.push(MAIN_SEPARATOR);
    path.push_str(segment);
}

/// Every destination path for one artifact coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLayout {
    metadata_dir: Utf8PathBuf,
    version_dir: Utf8PathBuf,
    artifact_id: String,
    version: String,
}

impl RepositoryLayout {
    /// Build the layout for a coordinate beneath `root`.
    #[must_use]
    pub fn new(root: &Utf8Path, group_id: &str, artifact_id: &str, version: &str) -> Self {
        let (metadata_dir, version_dir) = repository_dirs(root, group_id, artifact_id, version);
        Self {
            metadata_dir,
            version_dir,
            artifact_id: artifact_id.to_owned(),
            version: version.to_owned(),
        }
    }

    /// Directory holding `maven-metadata.xml` (the artifact id level).
    #[must_use]
    pub fn metadata_dir(&self) -> &Utf8Path {
        &self.metadata_dir
    }

    /// Directory holding the artifact, POM and sources archive.
    #[must_use]
    pub fn version_dir(&self) -> &Utf8Path {
        &self.version_dir
    }

    /// `<artifact>-<version>`, the stem shared by every versioned file.
    #[must_use]
    pub fn base_name(&self) -> String {
        format!("{}-{}", self.artifact_id, self.version)
    }

    /// Destination of the primary artifact.
    #[must_use]
    pub fn artifact_path(&self, kind: PackagingKind) -> Utf8PathBuf {
        self.version_dir
            .join(format!("{}{}", self.base_name(), kind.extension()))
    }

    /// Destination of the generated POM.
    #[must_use]
    pub fn pom_path(&self) -> Utf8PathBuf {
        self.version_dir.join(format!("{}.pom", self.base_name()))
    }

    /// Destination of the optional sources archive.
    #[must_use]
    pub fn sources_path(&self) -> Utf8PathBuf {
        self.version_dir
            .join(format!("{}-sources.jar", self.base_name()))
    }

    /// Destination of the metadata descriptor.
    #[must_use]
    pub fn metadata_path(&self) -> Utf8PathBuf {
        self.metadata_dir.join(METADATA_FILE_NAME)
    }
}
