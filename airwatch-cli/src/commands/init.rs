//! Init command - write the default configuration file.

use airwatch::config::{config_file_path, ConfigFile};
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// What [`write_default_config`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    Overwritten(PathBuf),
    /// File already present and `--force` not given
    Exists(PathBuf),
}

/// Writes the default config to `path` unless it exists and `force` is off.
pub fn write_default_config(path: &Path, force: bool) -> Result<InitOutcome, CliError> {
    let existed = path.exists();
    if existed && !force {
        return Ok(InitOutcome::Exists(path.to_path_buf()));
    }

    ConfigFile::default().save_to(path)?;

    Ok(if existed {
        InitOutcome::Overwritten(path.to_path_buf())
    } else {
        InitOutcome::Created(path.to_path_buf())
    })
}

/// Run the init command.
pub fn run(config_path: Option<&Path>, force: bool) -> Result<(), CliError> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path);

    match write_default_config(&path, force)? {
        InitOutcome::Created(path) => {
            println!("Created configuration file: {}", path.display());
        }
        InitOutcome::Overwritten(path) => {
            println!("Replaced configuration file with defaults: {}", path.display());
        }
        InitOutcome::Exists(path) => {
            println!("Configuration file already exists: {}", path.display());
            println!("Use --force to overwrite it with defaults.");
        }
    }

    Ok(())
}
