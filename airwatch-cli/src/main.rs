//! airwatch CLI - Command-line interface
//!
//! This binary provides a command-line interface to the airwatch library.

mod commands;
mod error;
mod runner;

use airwatch::aqi::ClassificationMode;
use airwatch::coord::Coordinate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use commands::cache::CacheAction;
use commands::compute::ComputeArgs;
use commands::forecast::ForecastArgs;
use commands::now::{NowArgs, DEFAULT_DEADLINE_SECS};

#[derive(Parser)]
#[command(name = "airwatch")]
#[command(version = airwatch::VERSION)]
#[command(about = "Air quality at the nearest PM2.5 monitoring station", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.airwatch/config.ini
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show air quality at the station nearest to a location
    Now {
        /// Query location as LAT,LON (defaults to the configured fallback)
        #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
        location: Option<Coordinate>,

        /// Print the reading as JSON
        #[arg(long)]
        json: bool,

        /// Bypass the reading cache
        #[arg(long)]
        no_cache: bool,

        /// Give up after this many seconds, retries included
        #[arg(long, value_name = "SECS", default_value_t = DEFAULT_DEADLINE_SECS)]
        deadline: u64,
    },

    /// Print the forecast published for one station as JSON
    Forecast {
        /// Station id as reported by `now`, e.g. 5363
        station_id: String,

        /// Give up after this many seconds, retries included
        #[arg(long, value_name = "SECS", default_value_t = DEFAULT_DEADLINE_SECS)]
        deadline: u64,
    },

    /// Convert a single PM2.5 measurement to AQI without any network access
    Compute {
        /// Raw PM2.5 concentration in µg/m³
        #[arg(long)]
        pm25: f64,

        /// Relative humidity in percent; enables the EPA sensor correction
        #[arg(long)]
        humidity: Option<f64>,

        /// Classify by `aqi` or `concentration` (defaults to config)
        #[arg(long)]
        classification: Option<ClassificationMode>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create the configuration file with default values
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Manage cached readings
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Now {
            location,
            json,
            no_cache,
            deadline,
        } => commands::now::run(
            NowArgs {
                location,
                json,
                no_cache,
                deadline: Duration::from_secs(deadline),
            },
            config_path,
            cli.verbose,
        ),
        Commands::Forecast {
            station_id,
            deadline,
        } => commands::forecast::run(
            ForecastArgs {
                station_id,
                deadline: Duration::from_secs(deadline),
            },
            config_path,
            cli.verbose,
        ),
        Commands::Compute {
            pm25,
            humidity,
            classification,
            json,
        } => commands::compute::run(
            ComputeArgs {
                pm25,
                humidity,
                classification,
                json,
            },
            config_path,
        ),
        Commands::Init { force } => commands::init::run(config_path, force),
        Commands::Cache { action } => commands::cache::run(action, config_path, cli.verbose),
    };

    if let Err(e) = result {
        e.exit();
    }
}
