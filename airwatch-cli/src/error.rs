//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use airwatch::aqi::AqiError;
use airwatch::cache::CacheError;
use airwatch::config::ConfigFileError;
use airwatch::fetch::HttpError;
use airwatch::service::ResolveError;
use std::fmt;
use std::process;

/// Exit code for failures in the configuration file or arguments.
pub const EXIT_CONFIG: i32 = 2;

/// Exit code when the user interrupts a resolution (128 + SIGINT).
pub const EXIT_INTERRUPTED: i32 = 130;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(ConfigFileError),
    /// Invalid command-line input
    InvalidArgument(String),
    /// Failed to create the HTTP client
    ClientCreation(HttpError),
    /// Failed to start the async runtime or signal handler
    Runtime(String),
    /// Reading cache could not be opened or cleared
    Cache(CacheError),
    /// Resolution failed
    Resolve(ResolveError),
    /// Station forecast could not be fetched
    Forecast(ResolveError),
    /// Offline computation rejected its input
    Compute(AqiError),
    /// Failed to serialize command output
    Output(serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn code(&self) -> i32 {
        match self {
            CliError::Config(_) | CliError::InvalidArgument(_) => EXIT_CONFIG,
            CliError::Forecast(ResolveError::InvalidStationId(_)) => EXIT_CONFIG,
            CliError::Resolve(e) | CliError::Forecast(e) if e.is_cancelled() => EXIT_INTERRUPTED,
            _ => 1,
        }
    }

    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Config(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Fix the value in your config file, or regenerate it with:");
                eprintln!("  airwatch init --force");
            }
            CliError::Resolve(ResolveError::Fetch(_))
            | CliError::Forecast(ResolveError::Fetch(_)) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. No network connection");
                eprintln!("  2. The [source] urls in config.ini are wrong or the service is down");
                eprintln!("  3. The service requires an api_key");
            }
            _ => {}
        }

        process::exit(self.code())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::ClientCreation(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
            CliError::Cache(e) => write!(f, "Cache error: {}", e),
            CliError::Resolve(e) | CliError::Forecast(e) if e.is_cancelled() => {
                write!(f, "Interrupted")
            }
            CliError::Resolve(e) => write!(f, "Failed to resolve air quality: {}", e),
            CliError::Forecast(e) => write!(f, "Failed to fetch forecast: {}", e),
            CliError::Compute(e) => write!(f, "Failed to compute AQI: {}", e),
            CliError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::ClientCreation(e) => Some(e),
            CliError::Cache(e) => Some(e),
            CliError::Resolve(e) | CliError::Forecast(e) => Some(e),
            CliError::Compute(e) => Some(e),
            CliError::Output(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<CacheError> for CliError {
    fn from(e: CacheError) -> Self {
        CliError::Cache(e)
    }
}

impl From<ResolveError> for CliError {
    fn from(e: ResolveError) -> Self {
        CliError::Resolve(e)
    }
}

impl From<AqiError> for CliError {
    fn from(e: AqiError) -> Self {
        CliError::Compute(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e)
    }
}
