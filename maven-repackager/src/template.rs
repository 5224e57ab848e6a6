//! POM and metadata templates.
//!
//! Templates are plain text with sentinel tokens such as `GROUP_ID_HERE`.
//! Rendering replaces every occurrence of each token literally; replacement
//! text is never interpreted, so `$` or `\` in a version string survive
//! unchanged.
//!
//! The default [`EmbeddedTemplates`] provider ships the templates inside the
//! binary. [`DirectoryTemplates`] reads them from an installation directory
//! instead, which lets packagers customize the generated POM.

use crate::error::{RepackagerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io::ErrorKind;

/// Token replaced by the group id.
pub const GROUP_ID_TOKEN: &str = "GROUP_ID_HERE";
/// Token replaced by the artifact id.
pub const ARTIFACT_ID_TOKEN: &str = "ARTIFACT_ID_HERE";
/// Token replaced by the artifact version.
pub const VERSION_TOKEN: &str = "ARTIFACT_VERSION_HERE";
/// Token replaced by the POM packaging label.
pub const PACKAGING_TOKEN: &str = "ARTIFACT_EXTENSION_HERE";
/// Token replaced by the metadata `lastUpdated` stamp.
pub const TIMESTAMP_TOKEN: &str = "ARTIFACT_DATE_HERE";

const EMBEDDED_POM: &str = include_str!("../templates/artifact-pom.pom");
const EMBEDDED_METADATA: &str = include_str!("../templates/maven-metadata.xml");

/// The two templates a run renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Project object model for the artifact version.
    Pom,
    /// Repository metadata for the artifact id.
    Metadata,
}

impl TemplateKind {
    /// File name of the template inside a template directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Pom => "artifact-pom.pom",
            Self::Metadata => "maven-metadata.xml",
        }
    }
}

/// Read-only source of template text.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateProvider {
    /// Return the raw text of the `kind` template.
    ///
    /// # Errors
    ///
    /// Returns [`RepackagerError::ResourceMissing`] when the template does
    /// not exist, or another error if it cannot be read.
    fn template(&self, kind: TemplateKind) -> Result<String>;
}

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl TemplateProvider for EmbeddedTemplates {
    fn template(&self, kind: TemplateKind) -> Result<String> {
        let text = match kind {
            TemplateKind::Pom => EMBEDDED_POM,
            TemplateKind::Metadata => EMBEDDED_METADATA,
        };
        Ok(text.to_owned())
    }
}

/// Templates loaded from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    dir: Utf8PathBuf,
}

impl DirectoryTemplates {
    /// Provider reading `artifact-pom.pom` and `maven-metadata.xml` from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the templates are read from.
    #[must_use]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }
}

impl TemplateProvider for DirectoryTemplates {
    fn template(&self, kind: TemplateKind) -> Result<String> {
        let path = self.dir.join(kind.file_name());
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RepackagerError::ResourceMissing {
                name: kind.file_name(),
                path,
            },
            _ => RepackagerError::file_operation("read template", path, e),
        })
    }
}

/// Replace every occurrence of each token with its value.
///
/// Substitutions are applied in order, each over the output of the previous
/// one.
///
/// # Examples
///
/// ```
/// use maven_repackager::template::render;
///
/// let text = render("<v>V</v><v>V</v>", &[("V", "1.0")]);
/// assert_eq!(text, "<v>1.0</v><v>1.0</v>");
/// ```
#[must_use]
pub fn render(template: &str, substitutions: &[(&str, &str)]) -> String {
    substitutions
        .iter()
        .fold(template.to_owned(), |text, &(token, value)| {
            text.replace(token, value)
        })
}
