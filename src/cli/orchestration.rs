//! Main workflow orchestration logic
//!
//! Reads every configured bump file, locates its version, and (when a new
//! version is requested) rewrites all of them. This module owns the file
//! I/O; the manifest updaters stay pure.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{BumpFile, Config};
use crate::error::{Result, VerbumpError};
use crate::manifest::{updater_for, ManifestFormat};

/// Arguments for the bump workflow
///
/// Mirrors the CLI arguments in a form that can be driven programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BumpWorkflowArgs {
    /// Directory that bump file names are resolved against
    pub root: PathBuf,

    /// Version to write; `None` only reads
    pub new_version: Option<String>,

    /// Compute changes without writing files
    pub dry_run: bool,
}

/// Outcome for a single bump file
#[derive(Debug, Clone, PartialEq)]
pub struct FileBump {
    pub path: PathBuf,
    pub format: ManifestFormat,
    pub previous: String,
    pub current: String,
    pub written: bool,
}

/// Result of a bump workflow
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowResult {
    pub files: Vec<FileBump>,
}

impl WorkflowResult {
    /// True when any file was rewritten on disk
    pub fn any_written(&self) -> bool {
        self.files.iter().any(|file| file.written)
    }
}

struct Planned {
    bump: FileBump,
    updated: Option<String>,
}

/// Main bump workflow
///
/// 1. Read each bump file and locate its version
/// 2. Compute the updated contents of every file
/// 3. Write them back unless this is a dry run
///
/// Nothing is written if any file fails in steps 1 or 2.
///
/// # Arguments
///
/// * `args` - Workflow arguments (root, new version, dry run)
/// * `config` - verbump configuration
pub fn run_bump_workflow(args: &BumpWorkflowArgs, config: &Config) -> Result<WorkflowResult> {
    let mut plan = Vec::with_capacity(config.bump_files.len());
    for bump_file in &config.bump_files {
        plan.push(plan_file(&args.root, bump_file, args.new_version.as_deref())?);
    }

    let mut files = Vec::with_capacity(plan.len());
    for Planned { mut bump, updated } in plan {
        if let Some(contents) = updated {
            if !args.dry_run && bump.previous != bump.current {
                fs::write(&bump.path, contents).map_err(|e| with_path(e, &bump.path))?;
                bump.written = true;
                info!(
                    path = %bump.path.display(),
                    from = bump.previous.as_str(),
                    to = bump.current.as_str(),
                    "updated version"
                );
            }
        }
        files.push(bump);
    }

    Ok(WorkflowResult { files })
}

/// Read-only variant: reports the current version of each bump file.
pub fn current_versions(root: &Path, config: &Config) -> Result<Vec<FileBump>> {
    let args = BumpWorkflowArgs {
        root: root.to_path_buf(),
        new_version: None,
        dry_run: true,
    };
    run_bump_workflow(&args, config).map(|result| result.files)
}

fn plan_file(root: &Path, bump_file: &BumpFile, new_version: Option<&str>) -> Result<Planned> {
    let path = root.join(&bump_file.filename);
    let format = bump_file.resolve_format()?;
    let updater = updater_for(format)?;

    let contents = fs::read_to_string(&path).map_err(|e| with_path(e, &path))?;
    let previous = updater.read(&contents).map_err(|e| in_file(e, &path))?;

    let (current, updated) = match new_version {
        Some(version) => {
            let updated = updater
                .write(&contents, version)
                .map_err(|e| in_file(e, &path))?;
            (version.to_string(), Some(updated))
        }
        None => (previous.clone(), None),
    };

    Ok(Planned {
        bump: FileBump {
            path,
            format,
            previous,
            current,
            written: false,
        },
        updated,
    })
}

fn with_path(err: std::io::Error, path: &Path) -> VerbumpError {
    VerbumpError::Io(std::io::Error::new(
        err.kind(),
        format!("{}: {}", path.display(), err),
    ))
}

fn in_file(err: VerbumpError, path: &Path) -> VerbumpError {
    match err {
        VerbumpError::NotFound(field) => {
            VerbumpError::not_found(format!("{} in {}", field, path.display()))
        }
        VerbumpError::Ambiguous { field, lines } => {
            VerbumpError::ambiguous(format!("{} in {}", field, path.display()), lines)
        }
        other => other,
    }
}
