pub mod categories;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod ui;

pub use error::{Result, VerbumpError};
pub use manifest::{updater_for, ManifestFormat, VersionUpdater};
