use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VerbumpError};

/// Maps a commit-type tag to a changelog section.
///
/// Hidden rules have no section; commits of that type are left out of the
/// changelog by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    #[serde(rename = "type")]
    pub r#type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    #[serde(default)]
    pub hidden: bool,
}

impl CategoryRule {
    /// A rule rendered under `section`
    pub fn visible(tag: &str, section: &str) -> Self {
        CategoryRule {
            r#type: tag.to_string(),
            section: Some(section.to_string()),
            hidden: false,
        }
    }

    /// A rule left out of the changelog
    pub fn hidden(tag: &str) -> Self {
        CategoryRule {
            r#type: tag.to_string(),
            section: None,
            hidden: true,
        }
    }
}

/// Returns the default commit-type rules, in changelog order.
pub fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::visible("feat", "Features"),
        CategoryRule::visible("fix", "Bug Fixes"),
        CategoryRule::visible("docs", "Documentation"),
        CategoryRule::hidden("chore"),
        CategoryRule::hidden("style"),
        CategoryRule::hidden("refactor"),
        CategoryRule::hidden("perf"),
        CategoryRule::hidden("test"),
    ]
}

/// Validated, immutable set of category rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

impl CategoryTable {
    /// Builds a table, rejecting duplicate tags and visible rules without a section.
    pub fn new(rules: Vec<CategoryRule>) -> Result<Self> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if rule.r#type.trim().is_empty() {
                return Err(VerbumpError::config("category rule with an empty type"));
            }
            if !seen.insert(rule.r#type.as_str()) {
                return Err(VerbumpError::config(format!(
                    "commit type '{}' is listed more than once",
                    rule.r#type
                )));
            }
            let has_section = rule
                .section
                .as_deref()
                .is_some_and(|section| !section.trim().is_empty());
            if !rule.hidden && !has_section {
                return Err(VerbumpError::config(format!(
                    "commit type '{}' is visible but has no section",
                    rule.r#type
                )));
            }
        }
        Ok(CategoryTable { rules })
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn lookup(&self, tag: &str) -> Option<&CategoryRule> {
        self.rules.iter().find(|rule| rule.r#type == tag)
    }

    /// Unknown tags count as hidden.
    pub fn is_hidden(&self, tag: &str) -> bool {
        self.lookup(tag).map_or(true, |rule| rule.hidden)
    }

    /// Section a commit of type `tag` is listed under, if any.
    pub fn section_for(&self, tag: &str) -> Option<&str> {
        self.lookup(tag)
            .filter(|rule| !rule.hidden)
            .and_then(|rule| rule.section.as_deref())
    }

    /// Visible section names in table order, each once.
    pub fn visible_sections(&self) -> Vec<&str> {
        let mut sections: Vec<&str> = Vec::new();
        for rule in self.rules.iter().filter(|rule| !rule.hidden) {
            if let Some(section) = rule.section.as_deref() {
                if !sections.contains(&section) {
                    sections.push(section);
                }
            }
        }
        sections
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        CategoryTable {
            rules: default_rules(),
        }
    }
}
