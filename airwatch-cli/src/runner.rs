//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and resolver
//! construction to reduce duplication across command handlers.

use crate::error::CliError;
use airwatch::cache::{NoOpStore, ReadingCache, ReadingStore};
use airwatch::config::{config_file_path, ConfigFile};
use airwatch::fetch::AsyncReqwestClient;
use airwatch::logging::{init_logging, LoggingGuard};
use airwatch::service::AirQualityResolver;
use airwatch::time::SystemClock;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
    config_path: PathBuf,
}

impl CliRunner {
    /// Load the config file and start logging.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Explicit config file, or `None` for `~/.airwatch/config.ini`
    /// * `verbose` - When true, debug-level logging unless `RUST_LOG` says otherwise
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self, CliError> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(config_file_path);
        let config = ConfigFile::load_from(&config_path)?;

        let level = if verbose { "debug" } else { "info" };
        let logging_guard =
            init_logging(&config.logging.directory, &config.logging.file, level)
                .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
            config_path,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("airwatch v{}", airwatch::VERSION);
        info!(
            config = %self.config_path.display(),
            "airwatch CLI: {} command", command
        );
    }

    /// Build a resolver from the loaded configuration.
    ///
    /// With `use_cache` false, or when the configured store cannot be
    /// opened, readings are neither read from nor written to any store.
    pub fn create_resolver(
        &self,
        use_cache: bool,
    ) -> Result<AirQualityResolver<AsyncReqwestClient>, CliError> {
        let resolver_config = self.config.resolver_config();
        let store: Arc<dyn ReadingStore> = if !use_cache {
            Arc::new(NoOpStore)
        } else {
            match self.config.reading_store() {
                Ok(store) => Arc::from(store),
                Err(e) => {
                    warn!(error = %e, "Reading cache unavailable, continuing without it");
                    Arc::new(NoOpStore)
                }
            }
        };
        info!(store = store.name(), "Reading store selected");

        let clock = Arc::new(SystemClock);
        let cache = ReadingCache::new(store, resolver_config.cache_ttl(), clock.clone());
        let client =
            AsyncReqwestClient::new(resolver_config.timeout()).map_err(CliError::ClientCreation)?;

        Ok(AirQualityResolver::new(
            client,
            cache,
            resolver_config,
            clock,
        ))
    }

    /// Run `task` to completion on a new multi-threaded runtime.
    ///
    /// Ctrl+C and `deadline` both cancel the token handed to `task`.
    pub fn block_on_cancellable<F, Fut, T>(
        &self,
        deadline: Duration,
        task: F,
    ) -> Result<T, CliError>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, CliError>>,
    {
        let cancel = CancellationToken::new();
        let handler_token = cancel.clone();
        ctrlc::set_handler(move || handler_token.cancel())
            .map_err(|e| CliError::Runtime(format!("Failed to set signal handler: {}", e)))?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::Runtime(e.to_string()))?;

        runtime.block_on(async move {
            let deadline_token = cancel.clone();
            let watchdog = tokio::spawn(async move {
                tokio::time::sleep(deadline).await;
                deadline_token.cancel();
            });

            let result = task(cancel).await;
            watchdog.abort();
            result
        })
    }
}
