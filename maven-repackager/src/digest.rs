//! Hex digest newtype for checksum sidecars.
//!
//! Validates that the value is lowercase hexadecimal of the exact length
//! produced by its algorithm.

use crate::checksum::ChecksumAlgorithm;
use crate::error::{RepackagerError, Result};
use std::fmt;

/// A validated lowercase hex digest tagged with its algorithm.
///
/// # Examples
///
/// ```
/// use maven_repackager::checksum::ChecksumAlgorithm;
/// use maven_repackager::digest::HexDigest;
///
/// let digest = HexDigest::new(ChecksumAlgorithm::Md5, "d41d8cd98f00b204e9800998ecf8427e").unwrap();
/// assert_eq!(digest.as_str().len(), 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexDigest {
    algorithm: ChecksumAlgorithm,
    hex: String,
}

impl HexDigest {
    /// Validate `hex` against `algorithm` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`RepackagerError::InvalidDigest`] if the length is wrong or
    /// the string contains anything other than `0-9a-f`.
    pub fn new(algorithm: ChecksumAlgorithm, hex: impl Into<String>) -> Result<Self> {
        let hex = hex.into();
        validate_hex(algorithm, &hex)?;
        Ok(Self { algorithm, hex })
    }

    /// The algorithm that produced this digest.
    #[must_use]
    pub const fn algorithm(&self) -> ChecksumAlgorithm {
        self.algorithm
    }

    /// Return the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.hex
    }
}

impl AsRef<str> for HexDigest {
    fn as_ref(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for HexDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

fn validate_hex(algorithm: ChecksumAlgorithm, value: &str) -> Result<()> {
    let expected = algorithm.hex_len();
    if value.len() != expected {
        return Err(RepackagerError::InvalidDigest {
            reason: format!(
                "{algorithm} expects {expected} hex characters, got {}",
                value.len()
            ),
        });
    }
    if let Some(bad) = value.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(RepackagerError::InvalidDigest {
            reason: format!("non-hex character '{bad}'"),
        });
    }
    if value.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(RepackagerError::InvalidDigest {
            reason: "digest must be lowercase".to_owned(),
        });
    }
    Ok(())
}
