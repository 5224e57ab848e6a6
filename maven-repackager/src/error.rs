//! Error types for the Maven repackager.
//!
//! Every failure is fatal for the run. Variants carry the path or value that
//! caused the failure so the single line printed by the binary is enough to
//! diagnose it.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while building a repository archive.
#[derive(Debug, Error)]
pub enum RepackagerError {
    /// The input file extension is neither `.aar` nor `.jar`.
    #[error("unsupported input {path}: expected a .aar or .jar file")]
    UnsupportedInputKind {
        /// Path supplied with `--input`.
        path: Utf8PathBuf,
    },

    /// The `--output` value does not name a usable staging directory.
    #[error("invalid output path {path:?}: {reason}")]
    InvalidOutput {
        /// Path supplied with `--output`.
        path: Utf8PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// The staging directory already exists and would be clobbered.
    #[error("staging directory {path} already exists; remove it or choose another output")]
    StagingDirExists {
        /// Path of the pre-existing staging directory.
        path: Utf8PathBuf,
    },

    /// A bundled or external template could not be found.
    #[error("template {name} not found at {path}")]
    ResourceMissing {
        /// File name of the template.
        name: &'static str,
        /// Location that was searched.
        path: Utf8PathBuf,
    },

    /// A filesystem operation failed on a known path.
    #[error("failed to {operation} {path}: {source}")]
    FileOperation {
        /// Short verb phrase describing the operation (copy, write, hash...).
        operation: &'static str,
        /// Path the operation acted on.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Copying a file into the staging tree failed.
    #[error("failed to copy {from} to {to}: {source}")]
    CopyFile {
        /// File being copied.
        from: Utf8PathBuf,
        /// Destination inside the staging tree.
        to: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the zip archive failed.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The `--timestamp` override is malformed.
    #[error("invalid timestamp {value}: {reason}")]
    InvalidTimestamp {
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A digest string failed validation.
    #[error("invalid digest: {reason}")]
    InvalidDigest {
        /// Why it was rejected.
        reason: String,
    },

    /// A path discovered on disk is not valid UTF-8.
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(std::path::PathBuf),
}

impl RepackagerError {
    /// Wrap an I/O error together with the operation and path it came from.
    #[must_use]
    pub fn file_operation(
        operation: &'static str,
        path: impl Into<Utf8PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileOperation {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using [`RepackagerError`].
pub type Result<T> = std::result::Result<T, RepackagerError>;
