//! Pure formatting functions for UI output.
//!
//! Everything here only prints; interaction lives in the parent module.

use console::style;

use crate::categories::CategoryTable;
use crate::cli::FileBump;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display the current version of each bump file.
pub fn display_current_versions(files: &[FileBump]) {
    println!("{}", style("Current versions:").bold());
    for file in files {
        println!(
            "  {} ({}): {}",
            file.path.display(),
            file.format,
            style(&file.previous).cyan()
        );
    }
}

/// Display the planned or applied version change of each bump file.
///
/// Files already at the target version are marked unchanged.
pub fn display_bump_summary(files: &[FileBump]) {
    println!("\n{}", style("Proposed Version Change:").bold());
    for file in files {
        if file.previous == file.current {
            println!(
                "  {}: {} (unchanged)",
                file.path.display(),
                style(&file.current).dim()
            );
        } else {
            println!(
                "  {}: {} -> {}",
                file.path.display(),
                style(&file.previous).red(),
                style(&file.current).green()
            );
        }
    }
}

/// Display the commit-type table used for changelog sections.
pub fn display_sections(table: &CategoryTable) {
    println!("{}", style("Changelog sections:").bold());
    for rule in table.rules() {
        match (rule.hidden, rule.section.as_deref()) {
            (false, Some(section)) => println!("  {:<10} {}", rule.r#type, section),
            _ => println!("  {:<10} {}", rule.r#type, style("(hidden)").dim()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestFormat;
    use std::path::PathBuf;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_bump_summary() {
        let files = vec![FileBump {
            path: PathBuf::from("pyproject.toml"),
            format: ManifestFormat::Toml,
            previous: "1.2.3".to_string(),
            current: "1.3.0".to_string(),
            written: false,
        }];
        display_current_versions(&files);
        display_bump_summary(&files);
    }

    #[test]
    fn test_display_sections() {
        display_sections(&CategoryTable::default());
    }
}
