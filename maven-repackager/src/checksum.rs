//! MD5 and SHA-1 checksums with Maven sidecar files.
//!
//! Maven repositories publish `<file>.md5` and `<file>.sha1` next to every
//! file. Each sidecar holds the bare lowercase hex digest: no filename and no
//! trailing newline.

use crate::digest::HexDigest;
use crate::error::{RepackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use sha1::{Digest, Sha1};
use std::fmt;
use std::fs;
use std::io::Read;

const READ_BUFFER_LEN: usize = 8192;

/// Digest algorithms published as sidecars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    /// 128-bit MD5.
    Md5,
    /// 160-bit SHA-1.
    Sha1,
}

impl ChecksumAlgorithm {
    /// All algorithms, in the order their sidecars are written.
    pub const ALL: [Self; 2] = [Self::Md5, Self::Sha1];

    /// Sidecar file extension, without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
        }
    }

    /// Length of the hex-encoded digest.
    #[must_use]
    pub const fn hex_len(self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha1 => 40,
        }
    }

    /// Path of the sidecar for `path`.
    #[must_use]
    pub fn sidecar_path(self, path: &Utf8Path) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{path}.{}", self.extension()))
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Md5 => f.write_str("MD5"),
            Self::Sha1 => f.write_str("SHA-1"),
        }
    }
}

/// Both digests of a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksums {
    /// MD5 digest.
    pub md5: HexDigest,
    /// SHA-1 digest.
    pub sha1: HexDigest,
}

impl Checksums {
    /// Digest for `algorithm`.
    #[must_use]
    pub const fn get(&self, algorithm: ChecksumAlgorithm) -> &HexDigest {
        match algorithm {
            ChecksumAlgorithm::Md5 => &self.md5,
            ChecksumAlgorithm::Sha1 => &self.sha1,
        }
    }
}

/// Compute the MD5 and SHA-1 digests of a file in a single read pass.
///
/// # Errors
///
/// Returns [`RepackagerError::FileOperation`] if the file cannot be opened
/// or read.
pub fn compute_checksums(path: &Utf8Path) -> Result<Checksums> {
    let hash_error = |e| RepackagerError::file_operation("hash", path, e);

    let mut file = fs::File::open(path).map_err(hash_error)?;
    let mut md5 = md5::Context::new();
    let mut sha1 = Sha1::new();
    let mut buffer = [0u8; READ_BUFFER_LEN];
    loop {
        let bytes_read = file.read(&mut buffer).map_err(hash_error)?;
        if bytes_read == 0 {
            break;
        }
        md5.consume(&buffer[..bytes_read]);
        sha1.update(&buffer[..bytes_read]);
    }

    Ok(Checksums {
        md5: HexDigest::new(ChecksumAlgorithm::Md5, format!("{:x}", md5.compute()))?,
        sha1: HexDigest::new(ChecksumAlgorithm::Sha1, format!("{:x}", sha1.finalize()))?,
    })
}

/// Compute both digests of `path` and write its `.md5` and `.sha1` sidecars.
///
/// Existing sidecars are overwritten.
///
/// # Errors
///
/// Returns [`RepackagerError::FileOperation`] if the file cannot be read or
/// a sidecar cannot be written.
pub fn write_sidecars(path: &Utf8Path) -> Result<Checksums> {
    let checksums = compute_checksums(path)?;
    for algorithm in ChecksumAlgorithm::ALL {
        let sidecar = algorithm.sidecar_path(path);
        fs::write(&sidecar, checksums.get(algorithm).as_str())
            .map_err(|e| RepackagerError::file_operation("write", &sidecar, e))?;
        trace!("wrote {algorithm} sidecar {sidecar}");
    }
    Ok(checksums)
}
