//! File staging into the repository layout.
//!
//! This module places the artifact, the rendered POM and metadata, and the
//! optional sources archive into the staging tree. Every staged file gets its
//! checksum sidecars immediately after it is written.

use crate::checksum::{Checksums, write_sidecars};
use crate::error::{RepackagerError, Result};
use crate::layout::RepositoryLayout;
use crate::packaging::PackagingKind;
use crate::template::{
    ARTIFACT_ID_TOKEN, GROUP_ID_TOKEN, PACKAGING_TOKEN, TIMESTAMP_TOKEN, TemplateKind,
    TemplateProvider, VERSION_TOKEN, render,
};
use crate::timestamp::MetadataTimestamp;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace};
use std::fs;

/// A file written into the staging tree together with its digests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Location inside the staging tree.
    pub path: Utf8PathBuf,
    /// Digests written to the sidecars.
    pub checksums: Checksums,
}

/// Handles staging of one artifact coordinate.
pub struct Stager {
    staging_root: Utf8PathBuf,
    layout: RepositoryLayout,
    group_id: String,
    artifact_id: String,
    version: String,
    packaging: PackagingKind,
}

impl Stager {
    /// Create a stager for a coordinate beneath `staging_root`.
    #[must_use]
    pub fn new(
        staging_root: Utf8PathBuf,
        group_id: &str,
        artifact_id: &str,
        version: &str,
        packaging: PackagingKind,
    ) -> Self {
        let layout = RepositoryLayout::new(&staging_root, group_id, artifact_id, version);
        Self {
            staging_root,
            layout,
            group_id: group_id.to_owned(),
            artifact_id: artifact_id.to_owned(),
            version: version.to_owned(),
            packaging,
        }
    }

    /// Root of the staging tree.
    #[must_use]
    pub fn staging_root(&self) -> &Utf8Path {
        &self.staging_root
    }

    /// Layout of the coordinate inside the staging tree.
    #[must_use]
    pub const fn layout(&self) -> &RepositoryLayout {
        &self.layout
    }

    /// Create the version directory (and with it the metadata directory).
    ///
    /// # Errors
    ///
    /// Returns [`RepackagerError::StagingDirExists`] if the staging root is
    /// already present, or [`RepackagerError::FileOperation`] if the
    /// directories cannot be created.
    pub fn prepare(&self) -> Result<()> {
        if self.staging_root.symlink_metadata().is_ok() {
            return Err(RepackagerError::StagingDirExists {
                path: self.staging_root.clone(),
            });
        }
        let version_dir = self.layout.version_dir();
        fs::create_dir_all(version_dir)
            .map_err(|e| RepackagerError::file_operation("create directory", version_dir, e))?;
        debug!("created staging tree {version_dir}");
        Ok(())
    }

    /// Copy the artifact into the version directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy or checksum step fails.
    pub fn stage_artifact(&self, input: &Utf8Path) -> Result<StagedFile> {
        let dest = self.layout.artifact_path(self.packaging);
        copy_file(input, &dest)?;
        finish(dest)
    }

    /// Render the POM template into the version directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is unavailable or the POM cannot be
    /// written.
    pub fn stage_pom(&self, templates: &dyn TemplateProvider) -> Result<StagedFile> {
        let template = templates.template(TemplateKind::Pom)?;
        let text = render(
            &template,
            &[
                (GROUP_ID_TOKEN, self.group_id.as_str()),
                (ARTIFACT_ID_TOKEN, self.artifact_id.as_str()),
                (VERSION_TOKEN, self.version.as_str()),
                (PACKAGING_TOKEN, self.packaging.label()),
            ],
        );
        let dest = self.layout.pom_path();
        write_text(&dest, &text)?;
        finish(dest)
    }

    /// Render the metadata template into the metadata directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is unavailable or the metadata
    /// cannot be written.
    pub fn stage_metadata(
        &self,
        templates: &dyn TemplateProvider,
        timestamp: &MetadataTimestamp,
    ) -> Result<StagedFile> {
        let template = templates.template(TemplateKind::Metadata)?;
        let text = render(
            &template,
            &[
                (GROUP_ID_TOKEN, self.group_id.as_str()),
                (ARTIFACT_ID_TOKEN, self.artifact_id.as_str()),
                (VERSION_TOKEN, self.version.as_str()),
                (TIMESTAMP_TOKEN, timestamp.as_str()),
            ],
        );
        let dest = self.layout.metadata_path();
        write_text(&dest, &text)?;
        finish(dest)
    }

    /// Copy a sources archive into the version directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy or checksum step fails.
    pub fn stage_sources(&self, sources: &Utf8Path) -> Result<StagedFile> {
        let dest = self.layout.sources_path();
        copy_file(sources, &dest)?;
        finish(dest)
    }
}

fn copy_file(source: &Utf8Path, dest: &Utf8Path) -> Result<()> {
    fs::copy(source, dest).map_err(|e| RepackagerError::CopyFile {
        from: source.to_owned(),
        to: dest.to_owned(),
        source: e,
    })?;
    trace!("copied {source} to {dest}");
    Ok(())
}

fn write_text(dest: &Utf8Path, text: &str) -> Result<()> {
    fs::write(dest, text).map_err(|e| RepackagerError::file_operation("write", dest, e))?;
    trace!("wrote {dest}");
    Ok(())
}

fn finish(path: Utf8PathBuf) -> Result<StagedFile> {
    let checksums = write_sidecars(&path)?;
    Ok(StagedFile { path, checksums })
}

#[cfg(test)]
#[path = "stager_tests.rs"]
mod tests;
