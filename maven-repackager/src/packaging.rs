//! Input classification by file extension.
//!
//! Only Android library archives (`.aar`) and plain Java archives (`.jar`)
//! are accepted. The kind decides both the staged file extension and the
//! `<packaging>` label written into the POM.

use crate::error::{RepackagerError, Result};
use camino::Utf8Path;
use std::fmt;

/// The two supported artifact package kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackagingKind {
    /// Android library archive.
    Aar,
    /// Plain Java archive.
    Jar,
}

impl PackagingKind {
    /// Classify `path` by its suffix.
    ///
    /// Matching is a case-sensitive suffix test on the full path string, so
    /// `lib.AAR` is rejected just like `lib.zip`.
    ///
    /// # Errors
    ///
    /// Returns [`RepackagerError::UnsupportedInputKind`] when the path ends in
    /// neither `.aar` nor `.jar`.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use maven_repackager::packaging::PackagingKind;
    ///
    /// let kind = PackagingKind::classify(Utf8Path::new("build/lib-release.aar")).unwrap();
    /// assert_eq!(kind.label(), "aar");
    /// assert!(PackagingKind::classify(Utf8Path::new("lib.zip")).is_err());
    /// ```
    pub fn classify(path: &Utf8Path) -> Result<Self> {
        let raw = path.as_str();
        if raw.ends_with(Self::Aar.extension()) {
            Ok(Self::Aar)
        } else if raw.ends_with(Self::Jar.extension()) {
            Ok(Self::Jar)
        } else {
            Err(RepackagerError::UnsupportedInputKind {
                path: path.to_owned(),
            })
        }
    }

    /// Packaging label written into the POM.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aar => "aar",
            Self::Jar => "jar",
        }
    }

    /// File extension, including the leading dot, used for the staged artifact.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Aar => ".aar",
            Self::Jar => ".jar",
        }
    }
}

impl fmt::Display for PackagingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
