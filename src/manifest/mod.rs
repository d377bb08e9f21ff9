//! Manifest formats and their version updaters.
//!
//! Each supported manifest format has a [`VersionUpdater`] that knows where
//! the version lives in that format. Callers pick one with [`updater_for`],
//! usually after resolving the format from configuration or the file name.

pub mod locator;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VerbumpError};
pub use locator::{FieldMatch, VersionField};

/// Supported manifest formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    /// `version = "..."` in Cargo.toml, pyproject.toml and similar
    Toml,
    /// `"version": "..."` in package.json
    Json,
    /// `__version__ = "..."` in a Python module
    Python,
}

impl ManifestFormat {
    pub const ALL: [ManifestFormat; 3] = [
        ManifestFormat::Toml,
        ManifestFormat::Json,
        ManifestFormat::Python,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestFormat::Toml => "toml",
            ManifestFormat::Json => "json",
            ManifestFormat::Python => "python",
        }
    }

    /// Infers the format from a manifest's file extension.
    ///
    /// # Example
    /// ```ignore
    /// assert_eq!(ManifestFormat::detect(Path::new("Cargo.toml"))?, ManifestFormat::Toml);
    /// assert_eq!(ManifestFormat::detect(Path::new("src/pkg/__init__.py"))?, ManifestFormat::Python);
    /// ```
    pub fn detect(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("toml") => Ok(ManifestFormat::Toml),
            Some("json") => Ok(ManifestFormat::Json),
            Some("py") => Ok(ManifestFormat::Python),
            _ => Err(VerbumpError::unknown_format(format!(
                "cannot infer format of '{}', set it explicitly",
                path.display()
            ))),
        }
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManifestFormat {
    type Err = VerbumpError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        ManifestFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == wanted)
            .ok_or_else(|| VerbumpError::unknown_format(s))
    }
}

/// Reads and rewrites the version field of one manifest format.
///
/// Both operations are pure text transformations; persisting the result is
/// the caller's job.
pub trait VersionUpdater {
    /// The format this updater handles
    fn format(&self) -> ManifestFormat;

    /// The field locator for this format
    fn field(&self) -> &VersionField;

    /// Returns the current version value.
    ///
    /// # Errors
    /// `NotFound` if the field is absent, `Ambiguous` if it occurs more than once.
    fn read(&self, contents: &str) -> Result<String> {
        self.field().read(contents).map(str::to_string)
    }

    /// Returns `contents` with only the version value replaced.
    ///
    /// # Errors
    /// Same as [`VersionUpdater::read`]; never appends a missing field.
    fn write(&self, contents: &str, new_version: &str) -> Result<String> {
        self.field().write(contents, new_version)
    }
}

/// TOML manifests: a `version` key at the start of a line.
///
/// Matching is line based, not a TOML parse: a `version = "..."` line inside
/// a multi-line string also counts and makes the file ambiguous. A leading
/// byte order mark is skipped.
pub struct TomlUpdater {
    field: VersionField,
}

impl TomlUpdater {
    pub fn new() -> Result<Self> {
        Ok(TomlUpdater {
            field: VersionField::new(
                r#"(?m)^\x{FEFF}?[ \t]*version[ \t]*=[ \t]*(?:"(?P<value>[^"\r\n]*)"|'(?P<literal>[^'\r\n]*)')"#,
                r#"version = "...""#,
            )?,
        })
    }
}

impl VersionUpdater for TomlUpdater {
    fn format(&self) -> ManifestFormat {
        ManifestFormat::Toml
    }

    fn field(&self) -> &VersionField {
        &self.field
    }
}

/// JSON manifests: a `"version"` member at the start of a line.
///
/// Only pretty-printed documents are supported. Minified JSON such as
/// `{"name":"a","version":"1.0.0"}` has no member starting a line and
/// reports `NotFound`.
pub struct JsonUpdater {
    field: VersionField,
}

impl JsonUpdater {
    pub fn new() -> Result<Self> {
        Ok(JsonUpdater {
            field: VersionField::new(
                r#"(?m)^\x{FEFF}?[ \t]*"version"[ \t]*:[ \t]*"(?P<value>[^"\r\n]*)""#,
                r#""version": "...""#,
            )?,
        })
    }
}

impl VersionUpdater for JsonUpdater {
    fn format(&self) -> ManifestFormat {
        ManifestFormat::Json
    }

    fn field(&self) -> &VersionField {
        &self.field
    }
}

/// Python modules: a module-level `__version__` assignment.
pub struct PythonUpdater {
    field: VersionField,
}

impl PythonUpdater {
    pub fn new() -> Result<Self> {
        Ok(PythonUpdater {
            field: VersionField::new(
                r#"(?m)^\x{FEFF}?__version__[ \t]*(?::[ \t]*str[ \t]*)?=[ \t]*(?:"(?P<value>[^"\r\n]*)"|'(?P<literal>[^'\r\n]*)')"#,
                r#"__version__ = "...""#,
            )?,
        })
    }
}

impl VersionUpdater for PythonUpdater {
    fn format(&self) -> ManifestFormat {
        ManifestFormat::Python
    }

    fn field(&self) -> &VersionField {
        &self.field
    }
}

/// Creates the updater for a manifest format.
pub fn updater_for(format: ManifestFormat) -> Result<Box<dyn VersionUpdater>> {
    Ok(match format {
        ManifestFormat::Toml => Box::new(TomlUpdater::new()?),
        ManifestFormat::Json => Box::new(JsonUpdater::new()?),
        ManifestFormat::Python => Box::new(PythonUpdater::new()?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(
            ManifestFormat::detect(Path::new("Cargo.toml")).unwrap(),
            ManifestFormat::Toml
        );
        assert_eq!(
            ManifestFormat::detect(Path::new("web/package.json")).unwrap(),
            ManifestFormat::Json
        );
        assert_eq!(
            ManifestFormat::detect(Path::new("src/pkg/__init__.py")).unwrap(),
            ManifestFormat::Python
        );
        assert_eq!(
            ManifestFormat::detect(Path::new("PYPROJECT.TOML")).unwrap(),
            ManifestFormat::Toml
        );
    }

    #[test]
    fn test_detect_unknown_extension() {
        assert!(matches!(
            ManifestFormat::detect(Path::new("VERSION")),
            Err(VerbumpError::UnknownFormat(_))
        ));
        assert!(ManifestFormat::detect(Path::new("setup.cfg")).is_err());
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("toml".parse::<ManifestFormat>().unwrap(), ManifestFormat::Toml);
        assert_eq!(" JSON ".parse::<ManifestFormat>().unwrap(), ManifestFormat::Json);
        assert_eq!("Python".parse::<ManifestFormat>().unwrap(), ManifestFormat::Python);
        assert!("yaml".parse::<ManifestFormat>().is_err());
    }

    #[test]
    fn test_format_display_round_trips() {
        for format in ManifestFormat::ALL {
            assert_eq!(format.to_string().parse::<ManifestFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_updater_for_reports_its_format() {
        for format in ManifestFormat::ALL {
            assert_eq!(updater_for(format).unwrap().format(), format);
        }
    }

    #[test]
    fn test_toml_ignores_inline_tables() {
        let contents = "[package]\nname = \"x\"\nversion = \"0.3.1\"\n\n[dependencies]\nserde = { version = \"1.0\", features = [\"derive\"] }\n";
        let updater = updater_for(ManifestFormat::Toml).unwrap();
        assert_eq!(updater.read(contents).unwrap(), "0.3.1");
    }

    #[test]
    fn test_json_nested_version_is_ambiguous() {
        let contents = "{\n  \"version\": \"1.0.0\",\n  \"engines\": {\n    \"version\": \"18\"\n  }\n}\n";
        let updater = updater_for(ManifestFormat::Json).unwrap();
        assert!(matches!(
            updater.read(contents),
            Err(VerbumpError::Ambiguous { .. })
        ));
    }

    #[test]
    fn test_leading_bom_is_skipped() {
        let cases = [
            (ManifestFormat::Toml, "\u{feff}version = \"1.0.0\"\n"),
            (ManifestFormat::Json, "\u{feff}\"version\": \"1.0.0\"\n"),
            (ManifestFormat::Python, "\u{feff}__version__ = \"1.0.0\"\n"),
        ];
        for (format, contents) in cases {
            let updater = updater_for(format).unwrap();
            assert_eq!(updater.read(contents).unwrap(), "1.0.0");
            let updated = updater.write(contents, "1.1.0").unwrap();
            assert!(updated.starts_with('\u{feff}'));
            assert_eq!(updater.read(&updated).unwrap(), "1.1.0");
        }
    }

    #[test]
    fn test_minified_json_not_supported() {
        let updater = updater_for(ManifestFormat::Json).unwrap();
        assert!(matches!(
            updater.read("{\"name\":\"a\",\"version\":\"1.0.0\"}"),
            Err(VerbumpError::NotFound(_))
        ));
    }

    #[test]
    fn test_toml_multiline_string_counts_as_field() {
        let contents = "version = \"1.0.0\"\nnotes = \"\"\"\nversion = \"0.1\"\n\"\"\"\n";
        let updater = updater_for(ManifestFormat::Toml).unwrap();
        match updater.read(contents) {
            Err(VerbumpError::Ambiguous { lines, .. }) => assert_eq!(lines, vec![1, 3]),
            other => panic!("expected ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn test_python_annotated_assignment() {
        let contents = "\"\"\"Package.\"\"\"\n__version__: str = '2.1.0'\n";
        let updater = updater_for(ManifestFormat::Python).unwrap();
        assert_eq!(updater.read(contents).unwrap(), "2.1.0");
        assert_eq!(
            updater.write(contents, "2.2.0").unwrap(),
            "\"\"\"Package.\"\"\"\n__version__: str = '2.2.0'\n"
        );
    }

    #[test]
    fn test_python_indented_assignment_ignored() {
        let contents = "__version__ = \"1.0\"\n\ndef f():\n    __version__ = \"2.0\"\n";
        let updater = updater_for(ManifestFormat::Python).unwrap();
        assert_eq!(updater.read(contents).unwrap(), "1.0");
    }
}
