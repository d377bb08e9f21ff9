use thiserror::Error;

/// Unified error type for verbump operations
#[derive(Error, Debug)]
pub enum VerbumpError {
    #[error("Version field not found: no line matches {0}")]
    NotFound(String),

    #[error("Ambiguous version field: {field} matches on lines {}", format_lines(.lines))]
    Ambiguous { field: String, lines: Vec<usize> },

    #[error("Cannot write version '{value}': {reason}")]
    UnrepresentableVersion { value: String, reason: String },

    #[error("Unknown manifest format: {0}")]
    UnknownFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in verbump
pub type Result<T> = std::result::Result<T, VerbumpError>;

fn format_lines(lines: &[usize]) -> String {
    lines
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl VerbumpError {
    /// Create a not-found error for the described field
    pub fn not_found(field: impl Into<String>) -> Self {
        VerbumpError::NotFound(field.into())
    }

    /// Create an ambiguity error listing every matching line (1-based)
    pub fn ambiguous(field: impl Into<String>, lines: Vec<usize>) -> Self {
        VerbumpError::Ambiguous {
            field: field.into(),
            lines,
        }
    }

    pub fn unrepresentable(value: impl Into<String>, reason: impl Into<String>) -> Self {
        VerbumpError::UnrepresentableVersion {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VerbumpError::Config(msg.into())
    }

    pub fn unknown_format(msg: impl Into<String>) -> Self {
        VerbumpError::UnknownFormat(msg.into())
    }

    /// True for the two locator failures that abort a release.
    pub fn is_locate_error(&self) -> bool {
        matches!(
            self,
            VerbumpError::NotFound(_) | VerbumpError::Ambiguous { .. }
        )
    }
}
