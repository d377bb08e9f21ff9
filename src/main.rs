use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use verbump::cli::{current_versions, run_bump_workflow, BumpWorkflowArgs};
use verbump::config::{self, BumpFile, Config};
use verbump::manifest::ManifestFormat;
use verbump::{logging, ui, VerbumpError};

#[derive(Parser)]
#[command(
    name = "verbump",
    version,
    about = "Read and update the version field of project manifests"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current version of each bump file
    Current {
        #[command(flatten)]
        target: Target,
    },
    /// Write a new version into every bump file
    Set {
        /// The new version, written as given
        #[arg(value_name = "VERSION")]
        new_version: String,

        #[command(flatten)]
        target: Target,

        #[arg(short, long, help = "Skip confirmation prompts")]
        force: bool,

        #[arg(long, help = "Preview what would happen without making changes")]
        dry_run: bool,
    },
    /// Show how commit types map to changelog sections
    Sections,
}

#[derive(clap::Args)]
struct Target {
    #[arg(long, help = "Operate on this file instead of the configured bump files")]
    file: Option<String>,

    #[arg(long, value_enum, requires = "file", help = "Manifest format of --file")]
    format: Option<ManifestFormat>,
}

impl Target {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(file) = &self.file {
            config.bump_files = vec![BumpFile::new(file.clone(), self.format)];
        }
        config
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init_logging(args.verbose) {
        eprintln!("{}", e);
    }

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        if e
            .downcast_ref::<VerbumpError>()
            .is_some_and(VerbumpError::is_locate_error)
        {
            ui::display_status("Each bump file must contain exactly one version field");
        }
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let root = PathBuf::from(".");

    match args.command {
        Command::Current { target } => {
            let config = target.apply(config);
            let files = current_versions(&root, &config)?;
            ui::display_current_versions(&files);
        }
        Command::Set {
            new_version,
            target,
            force,
            dry_run,
        } => {
            let config = target.apply(config);
            let mut workflow_args = BumpWorkflowArgs {
                root,
                new_version: Some(new_version.clone()),
                dry_run: true,
            };

            let preview = run_bump_workflow(&workflow_args, &config)?;
            ui::display_bump_summary(&preview.files);

            if dry_run {
                ui::display_status("Dry run: no files were changed");
                return Ok(());
            }

            if !force && !ui::confirm_action(&format!("Write version {}?", new_version))? {
                println!("Operation cancelled by user.");
                return Ok(());
            }

            workflow_args.dry_run = false;
            let result = run_bump_workflow(&workflow_args, &config)?;
            for file in result.files.iter().filter(|file| file.written) {
                ui::display_success(&format!("Updated {}", file.path.display()));
            }
            if !result.any_written() {
                ui::display_status(&format!("All files already at {}", new_version));
            }
        }
        Command::Sections => {
            let table = config.category_table()?;
            ui::display_sections(&table);
        }
    }

    Ok(())
}
