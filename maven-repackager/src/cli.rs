//! CLI argument definitions for the Maven repackager.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint so tests can parse argument vectors directly.

use camino::Utf8PathBuf;
use clap::Parser;

/// Repackage an AAR or JAR into a zipped Maven repository.
#[derive(Parser, Debug, Clone)]
#[command(name = "maven-repackager")]
#[command(about, disable_version_flag = true)]
#[command(long_about = concat!(
    "Repackage an AAR or JAR into a zipped Maven repository.\n\n",
    "The input is copied to <group>/<artifact>/<version>/ beneath a staging ",
    "directory together with a generated POM, an optional sources archive and ",
    "maven-metadata.xml. Every file gets .md5 and .sha1 checksum sidecars. The ",
    "staging directory is then zipped and removed.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Repackage an Android library:\n",
    "    $ maven-repackager -i lib-release.aar -o repo.zip -g org.openftc -a rc -v 4.3\n\n",
    "  Include a sources archive and a fixed metadata timestamp:\n",
    "    $ maven-repackager -i core.jar -s core-sources.jar -o repo \\\n",
    "        -g com.example -a core -v 1.0.0 --timestamp 20240101000000",
))]
pub struct Cli {
    /// AAR/JAR input file.
    #[arg(short, long, value_name = "FILE")]
    pub input: Utf8PathBuf,

    /// Sources JAR file.
    #[arg(short, long, value_name = "FILE")]
    pub sources: Option<Utf8PathBuf>,

    /// ZIP output file (a trailing .zip is optional).
    #[arg(short, long, value_name = "FILE")]
    pub output: Utf8PathBuf,

    /// Group name, dot-delimited.
    #[arg(short, long = "group", value_name = "GROUP")]
    pub group_id: String,

    /// Artifact name.
    #[arg(short, long = "artifact", value_name = "ARTIFACT")]
    pub artifact_id: String,

    /// Artifact version.
    #[arg(short, long, value_name = "VERSION")]
    pub version: String,

    /// Directory containing artifact-pom.pom and maven-metadata.xml templates
    /// [default: built-in templates].
    #[arg(long = "templates", value_name = "DIR")]
    pub template_dir: Option<Utf8PathBuf>,

    /// Fixed lastUpdated stamp (YYYYMMDDhhmmss) [default: current UTC time].
    #[arg(long, value_name = "STAMP")]
    pub timestamp: Option<String>,

    /// Show the repository layout and exit without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (repeatable: --verbose, --verbose --verbose).
    #[arg(long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
