//! Fixed-width `YYYYMMDDhhmmss` stamps for `maven-metadata.xml`.
//!
//! Generated stamps use UTC so the same input produces the same metadata on
//! every host regardless of its timezone.

use crate::error::{RepackagerError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;

const STAMP_LEN: usize = 14;
const STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// A `<lastUpdated>` value: fourteen ASCII digits forming a real UTC date
/// and time.
///
/// # Examples
///
/// ```
/// use maven_repackager::timestamp::MetadataTimestamp;
///
/// let stamp = MetadataTimestamp::try_from("20181004153012").unwrap();
/// assert_eq!(stamp.as_str(), "20181004153012");
/// assert!(MetadataTimestamp::try_from("2018-10-04").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataTimestamp(String);

impl MetadataTimestamp {
    /// Stamp for the current UTC wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Stamp for a specific instant.
    #[must_use]
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.format(STAMP_FORMAT).to_string())
    }

    /// Return the stamp as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for MetadataTimestamp {
    type Error = RepackagerError;

    fn try_from(value: &str) -> Result<Self> {
        if value.len() != STAMP_LEN {
            return Err(RepackagerError::InvalidTimestamp {
                value: value.to_owned(),
                reason: format!("expected {STAMP_LEN} digits, got {} characters", value.len()),
            });
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RepackagerError::InvalidTimestamp {
                value: value.to_owned(),
                reason: "only digits are allowed (YYYYMMDDhhmmss)".to_owned(),
            });
        }
        NaiveDateTime::parse_from_str(value, STAMP_FORMAT).map_err(|e| {
            RepackagerError::InvalidTimestamp {
                value: value.to_owned(),
                reason: format!("not a calendar date and time: {e}"),
            }
        })?;
        Ok(Self(value.to_owned()))
    }
}

impl fmt::Display for MetadataTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
