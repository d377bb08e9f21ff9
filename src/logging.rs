//! Tracing subscriber setup for the command-line driver.

use std::io;

use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Maps the `-v` count to a level name. Zero keeps output to warnings.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs a compact stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise the verbosity selects the level for
/// this crate only.
pub fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("verbump={}", level_for_verbosity(verbose))))
        .map_err(|e| anyhow::anyhow!("Failed to create tracing filter: {}", e))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}
