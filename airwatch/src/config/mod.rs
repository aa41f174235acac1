//! User configuration stored in `~/.airwatch/config.ini`.
//!
//! # Example
//!
//! ```no_run
//! use airwatch::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let resolver_config = config.resolver_config();
//! # Ok::<(), airwatch::config::ConfigFileError>(())
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    default_cache_directory, default_log_directory, DEFAULT_LOG_FILE, MAX_KEY_PRECISION,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    AqiSettings, CacheBackend, CacheSettings, ConfigFile, LocationSettings, LoggingSettings,
    SourceSettings,
};
