use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::categories::{default_rules, CategoryRule, CategoryTable};
use crate::error::{Result, VerbumpError};
use crate::manifest::ManifestFormat;

/// Represents the complete configuration for verbump.
///
/// Lists the manifest files that carry the project version and the commit-type
/// rules handed to the changelog renderer.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_bump_files")]
    pub bump_files: Vec<BumpFile>,

    #[serde(default = "default_rules")]
    pub types: Vec<CategoryRule>,
}

/// A manifest file whose version field is kept in sync.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BumpFile {
    pub filename: String,

    /// Explicit format; detected from the file name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ManifestFormat>,
}

impl BumpFile {
    pub fn new(filename: impl Into<String>, format: Option<ManifestFormat>) -> Self {
        BumpFile {
            filename: filename.into(),
            format,
        }
    }

    /// Returns the configured format, or the one implied by the file name.
    pub fn resolve_format(&self) -> Result<ManifestFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => ManifestFormat::detect(Path::new(&self.filename)),
        }
    }
}

/// Returns the default bump file list.
fn default_bump_files() -> Vec<BumpFile> {
    vec![BumpFile::new("pyproject.toml", Some(ManifestFormat::Toml))]
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bump_files: default_bump_files(),
            types: default_rules(),
        }
    }
}

impl Config {
    /// Checks that every bump file has a usable format and the rules form a valid table.
    pub fn validate(&self) -> Result<()> {
        if self.bump_files.is_empty() {
            return Err(VerbumpError::config("no bump files configured"));
        }
        for file in &self.bump_files {
            if file.filename.trim().is_empty() {
                return Err(VerbumpError::config("bump file with an empty filename"));
            }
            file.resolve_format()
                .map_err(|e| VerbumpError::config(format!("{}: {}", file.filename, e)))?;
        }
        self.category_table().map(|_| ())
    }

    pub fn category_table(&self) -> Result<CategoryTable> {
        CategoryTable::new(self.types.clone())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `verbump.toml` in current directory
/// 3. `.verbump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration, validated
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./verbump.toml").exists() {
        fs::read_to_string("./verbump.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".verbump.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses and validates configuration text.
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bump_files[0].filename, "pyproject.toml");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_resolve_format_prefers_explicit() {
        let file = BumpFile::new("VERSION.txt", Some(ManifestFormat::Python));
        assert_eq!(file.resolve_format().unwrap(), ManifestFormat::Python);
        let file = BumpFile::new("package.json", None);
        assert_eq!(file.resolve_format().unwrap(), ManifestFormat::Json);
    }

    #[test]
    fn test_validate_rejects_empty_bump_files() {
        let err = parse_config("bump_files = []").unwrap_err();
        assert!(err.to_string().contains("no bump files"));
    }

    #[test]
    fn test_validate_rejects_undetectable_format() {
        let err = parse_config("[[bump_files]]\nfilename = \"VERSION\"\n").unwrap_err();
        assert!(matches!(err, VerbumpError::Config(_)));
        assert!(err.to_string().contains("VERSION"));
    }

    #[test]
    fn test_unknown_format_name_fails_to_parse() {
        let err = parse_config("[[bump_files]]\nfilename = \"a.yml\"\nformat = \"yaml\"\n")
            .unwrap_err();
        assert!(matches!(err, VerbumpError::ConfigParse(_)));
    }
}
