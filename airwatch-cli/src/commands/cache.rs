//! Cache management CLI commands.

use airwatch::config::CacheBackend;
use clap::Subcommand;
use std::path::Path;
use tracing::info;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Cache action subcommands.
#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Remove every cached reading
    Clear,
}

/// Run a cache subcommand.
pub fn run(action: CacheAction, config_path: Option<&Path>, verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path, verbose)?;
    runner.log_startup("cache");
    let settings = &runner.config().cache;

    match action {
        CacheAction::Clear => {
            if !settings.enabled {
                println!("Caching is disabled in the configuration; nothing to clear.");
                return Ok(());
            }
            if settings.backend == CacheBackend::Memory {
                println!("The memory cache lives only for one command; nothing to clear.");
                return Ok(());
            }

            println!("Clearing reading cache at: {}", settings.directory.display());
            let store = runner.config().reading_store()?;
            store.clear()?;
            info!(store = store.name(), "Reading cache cleared");
            println!("Cache cleared");
            Ok(())
        }
    }
}
