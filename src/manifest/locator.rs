//! Format-independent version field locator.
//!
//! A [`VersionField`] wraps a line-anchored regex. Locating the field is a
//! single scan over the whole text; exactly one match is required; reads and
//! writes operate on the byte span of the captured value so that every other
//! byte of the manifest is left untouched.

use std::ops::Range;

use regex::Regex;
use tracing::debug;

use crate::error::{Result, VerbumpError};

/// Location of a version value inside a manifest's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    /// Byte range of the value, excluding the surrounding quotes
    pub value: Range<usize>,
    /// 1-based line number of the field
    pub line: usize,
    /// Quote character delimiting the value
    pub quote: char,
}

/// A version field described by a regex.
///
/// The pattern captures a double-quoted value in a group named `value` and,
/// optionally, a single-quoted value in a group named `literal`.
#[derive(Debug, Clone)]
pub struct VersionField {
    pattern: Regex,
    description: &'static str,
}

impl VersionField {
    /// Compiles `pattern` into a field locator.
    ///
    /// `description` is the human form of the field used in error messages,
    /// e.g. `version = "..."`.
    pub fn new(pattern: &str, description: &'static str) -> Result<Self> {
        Ok(VersionField {
            pattern: Regex::new(pattern)?,
            description,
        })
    }

    /// Finds the unique version field in `contents`.
    ///
    /// # Returns
    /// * `Ok(FieldMatch)` - The single matching field
    /// * `Err(NotFound)` - No line matches
    /// * `Err(Ambiguous)` - Two or more lines match
    pub fn locate(&self, contents: &str) -> Result<FieldMatch> {
        let mut found: Vec<FieldMatch> = self
            .pattern
            .captures_iter(contents)
            .filter_map(|caps| {
                caps.name("value")
                    .map(|m| (m.range(), '"'))
                    .or_else(|| caps.name("literal").map(|m| (m.range(), '\'')))
            })
            .map(|(value, quote)| FieldMatch {
                line: line_of(contents, value.start),
                value,
                quote,
            })
            .collect();

        match found.len() {
            0 => Err(VerbumpError::not_found(self.description)),
            1 => {
                let field = found.remove(0);
                debug!(line = field.line, field = self.description, "located version field");
                Ok(field)
            }
            _ => Err(VerbumpError::ambiguous(
                self.description,
                found.iter().map(|m| m.line).collect(),
            )),
        }
    }

    /// Returns the current version value as written in the manifest.
    pub fn read<'a>(&self, contents: &'a str) -> Result<&'a str> {
        let field = self.locate(contents)?;
        Ok(&contents[field.value])
    }

    /// Returns `contents` with the version value replaced by `new_version`.
    ///
    /// The replacement is purely textual. Values that would break out of the
    /// field's quoting are rejected so that reading the result yields
    /// `new_version` again.
    pub fn write(&self, contents: &str, new_version: &str) -> Result<String> {
        let field = self.locate(contents)?;
        check_representable(new_version, field.quote)?;

        let mut updated =
            String::with_capacity(contents.len() - field.value.len() + new_version.len());
        updated.push_str(&contents[..field.value.start]);
        updated.push_str(new_version);
        updated.push_str(&contents[field.value.end..]);

        debug!(
            line = field.line,
            from = &contents[field.value.clone()],
            to = new_version,
            "replaced version value"
        );
        Ok(updated)
    }
}

fn line_of(contents: &str, offset: usize) -> usize {
    contents[..offset].matches('\n').count() + 1
}

fn check_representable(value: &str, quote: char) -> Result<()> {
    if value.contains(['\r', '\n']) {
        return Err(VerbumpError::unrepresentable(value, "contains a line break"));
    }
    if value.contains(quote) {
        return Err(VerbumpError::unrepresentable(
            value,
            format!("contains the delimiting quote {}", quote),
        ));
    }
    if value.contains('\\') {
        return Err(VerbumpError::unrepresentable(value, "contains a backslash"));
    }
    if value.chars().any(char::is_control) {
        return Err(VerbumpError::unrepresentable(
            value,
            "contains a control character",
        ));
    }
    Ok(())
}
