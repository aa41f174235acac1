//! Now command - air quality at the nearest station.

use airwatch::coord::Coordinate;
use airwatch::location::{FallbackLocation, FixedLocation, LocationSource};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use super::common::format_reading;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Default overall deadline for a network command, covering every retry.
pub const DEFAULT_DEADLINE_SECS: u64 = 60;

/// Arguments for the now command.
pub struct NowArgs {
    pub location: Option<Coordinate>,
    pub json: bool,
    pub no_cache: bool,
    pub deadline: Duration,
}

/// Run the now command.
pub fn run(args: NowArgs, config_path: Option<&Path>, verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path, verbose)?;
    runner.log_startup("now");
    let config = runner.config();

    let resolver = runner.create_resolver(!args.no_cache)?;
    let primary: Option<Box<dyn LocationSource>> = args
        .location
        .map(|c| Box::new(FixedLocation(c)) as Box<dyn LocationSource>);
    let location = FallbackLocation::new(primary, config.location.fallback());

    let reading = runner.block_on_cancellable(args.deadline, |cancel| async move {
        let origin = location.locate().await;
        info!(origin = %origin, "Resolving air quality");
        resolver
            .resolve(origin, &cancel)
            .await
            .map_err(CliError::Resolve)
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reading)?);
    } else {
        println!("{}", format_reading(&reading));
    }

    Ok(())
}
