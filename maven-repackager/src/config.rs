//! Immutable run configuration.
//!
//! [`RepackageConfig`] is built once from the parsed command line and then
//! passed by reference through every pipeline stage. Construction performs
//! all validation that must happen before the first filesystem write:
//! input classification, output path normalization and timestamp parsing.

use crate::cli::Cli;
use crate::error::{RepackagerError, Result};
use crate::layout::RepositoryLayout;
use crate::packaging::PackagingKind;
use crate::timestamp::MetadataTimestamp;
use camino::{Utf8Path, Utf8PathBuf};

/// Extension appended by the archive step.
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// Everything one run needs, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepackageConfig {
    /// Artifact file to publish.
    pub input: Utf8PathBuf,
    /// Optional companion sources archive.
    pub sources: Option<Utf8PathBuf>,
    /// Directory the repository tree is staged in before zipping.
    pub staging_root: Utf8PathBuf,
    /// Final archive path (`staging_root` plus `.zip`).
    pub archive_path: Utf8PathBuf,
    /// Dot-delimited group id.
    pub group_id: String,
    /// Artifact id.
    pub artifact_id: String,
    /// Artifact version.
    pub version: String,
    /// Package kind derived from the input extension.
    pub packaging: PackagingKind,
    /// Fixed metadata stamp; `None` means the current time.
    pub timestamp: Option<MetadataTimestamp>,
    /// Directory of template overrides; `None` means built-in templates.
    pub template_dir: Option<Utf8PathBuf>,
}

impl RepackageConfig {
    /// Validate the parsed command line into a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RepackagerError::UnsupportedInputKind`] for an input that is
    /// neither `.aar` nor `.jar`, [`RepackagerError::InvalidOutput`] when the
    /// output path is empty once `.zip` is removed, and
    /// [`RepackagerError::InvalidTimestamp`] for a malformed `--timestamp`.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let packaging = PackagingKind::classify(&cli.input)?;
        let staging_root = staging_root_for(&cli.output)?;
        let archive_path = Utf8PathBuf::from(format!("{staging_root}{ARCHIVE_EXTENSION}"));
        let timestamp = cli
            .timestamp
            .as_deref()
            .map(MetadataTimestamp::try_from)
            .transpose()?;

        Ok(Self {
            input: cli.input.clone(),
            sources: cli.sources.clone(),
            staging_root,
            archive_path,
            group_id: cli.group_id.clone(),
            artifact_id: cli.artifact_id.clone(),
            version: cli.version.clone(),
            packaging,
            timestamp,
            template_dir: cli.template_dir.clone(),
        })
    }

    /// Repository layout beneath the staging root.
    #[must_use]
    pub fn layout(&self) -> RepositoryLayout {
        RepositoryLayout::new(
            &self.staging_root,
            &self.group_id,
            &self.artifact_id,
            &self.version,
        )
    }
}

/// Strip a trailing `.zip` from `output` and normalize the remainder.
///
/// The archive step re-adds the extension, so `repo.zip` and `repo` both
/// stage into `repo` and produce `repo.zip`.
///
/// # Errors
///
/// Returns [`RepackagerError::InvalidOutput`] if nothing is left after
/// stripping.
pub fn staging_root_for(output: &Utf8Path) -> Result<Utf8PathBuf> {
    let raw = output.as_str();
    let stem = raw.strip_suffix(ARCHIVE_EXTENSION).unwrap_or(raw);
    let staging_root: Utf8PathBuf = Utf8Path::new(stem).components().collect();
    if staging_root.as_str().is_empty() || staging_root.file_name().is_none() {
        return Err(RepackagerError::InvalidOutput {
            path: output.to_owned(),
            reason: "output must name a file, not just a directory or extension".to_owned(),
        });
    }
    Ok(staging_root)
}
