//! Maven repackager library.
//!
//! This crate turns a single AAR or JAR (plus an optional sources JAR) into a
//! zipped Maven repository: the artifact, a generated POM and
//! `maven-metadata.xml`, each with `.md5` and `.sha1` sidecars, laid out
//! under `group/as/path/artifact/version/`. It backs the `maven-repackager`
//! binary and can be driven programmatically.
//!
//! # Modules
//!
//! - [`archive`] - Zip packing and staging cleanup
//! - [`checksum`] - MD5/SHA-1 digests and sidecar files
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Validated, immutable run configuration
//! - [`digest`] - Lowercase hex digest newtype
//! - [`error`] - Error types
//! - [`layout`] - Repository directory layout and file naming
//! - [`packaging`] - Input classification (`aar` or `jar`)
//! - [`pipeline`] - Stage orchestration and dry-run planning
//! - [`stager`] - Writing files into the staging tree
//! - [`template`] - Template providers and rendering
//! - [`timestamp`] - Metadata `lastUpdated` stamps

pub mod archive;
pub mod checksum;
pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod layout;
pub mod packaging;
pub mod pipeline;
pub mod stager;
pub mod template;
pub mod timestamp;
