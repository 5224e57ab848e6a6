//! Repackaging pipeline orchestration.
//!
//! Runs the stages in a fixed order: prepare the staging tree, stage the
//! artifact, POM, metadata and optional sources (each followed by its
//! sidecars), zip the tree, then remove it. The first failing stage aborts
//! the run and leaves whatever was already written in place.

use crate::archive::{remove_staging_dir, zip_directory};
use crate::checksum::ChecksumAlgorithm;
use crate::config::RepackageConfig;
use crate::error::Result;
use crate::stager::{StagedFile, Stager};
use crate::template::{DirectoryTemplates, EmbeddedTemplates, TemplateProvider};
use crate::timestamp::MetadataTimestamp;
use camino::Utf8PathBuf;
use log::{debug, info};

/// Result of a successful run.
#[derive(Debug)]
pub struct RepackageOutcome {
    /// The archive that was written.
    pub archive_path: Utf8PathBuf,
    /// Files that were staged, in staging order.
    pub staged: Vec<StagedFile>,
    /// Archive entry names, in archive order.
    pub entries: Vec<String>,
}

/// Pick the template provider requested by `config`.
#[must_use]
pub fn template_provider(config: &RepackageConfig) -> Box<dyn TemplateProvider> {
    match &config.template_dir {
        Some(dir) => Box::new(DirectoryTemplates::new(dir.clone())),
        None => Box::new(EmbeddedTemplates),
    }
}

fn stager_for(config: &RepackageConfig) -> Stager {
    Stager::new(
        config.staging_root.clone(),
        &config.group_id,
        &config.artifact_id,
        &config.version,
        config.packaging,
    )
}

/// Build the repository archive described by `config`.
///
/// # Errors
///
/// Returns the error of the first stage that fails. The staging directory is
/// only removed once the archive has been written successfully.
pub fn repackage(
    config: &RepackageConfig,
    templates: &dyn TemplateProvider,
) -> Result<RepackageOutcome> {
    let stager = stager_for(config);
    stager.prepare()?;

    let mut staged = Vec::with_capacity(4);

    debug!("staging artifact {}", config.input);
    staged.push(stager.stage_artifact(&config.input)?);

    debug!("rendering POM");
    staged.push(stager.stage_pom(templates)?);

    let timestamp = config
        .timestamp
        .clone()
        .unwrap_or_else(MetadataTimestamp::now);
    debug!("rendering metadata with lastUpdated {timestamp}");
    staged.push(stager.stage_metadata(templates, &timestamp)?);

    if let Some(sources) = &config.sources {
        debug!("staging sources {sources}");
        staged.push(stager.stage_sources(sources)?);
    }

    debug!("packing {} into {}", config.staging_root, config.archive_path);
    let entries = zip_directory(&config.staging_root, &config.archive_path)?;
    remove_staging_dir(&config.staging_root)?;

    info!(
        "wrote {} ({} files staged)",
        config.archive_path,
        staged.len()
    );
    Ok(RepackageOutcome {
        archive_path: config.archive_path.clone(),
        staged,
        entries,
    })
}

/// List every file a run would write into the staging tree, sidecars
/// included, without touching the filesystem.
#[must_use]
pub fn plan(config: &RepackageConfig) -> Vec<Utf8PathBuf> {
    let layout = config.layout();
    let mut primary = vec![
        layout.artifact_path(config.packaging),
        layout.pom_path(),
        layout.metadata_path(),
    ];
    if config.sources.is_some() {
        primary.push(layout.sources_path());
    }

    primary
        .into_iter()
        .flat_map(|path| {
            let sidecars = ChecksumAlgorithm::ALL.map(|algorithm| algorithm.sidecar_path(&path));
            std::iter::once(path).chain(sidecars)
        })
        .collect()
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
