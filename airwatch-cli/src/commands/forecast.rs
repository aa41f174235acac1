//! Forecast command - raw forecast document for one station.

use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the forecast command.
pub struct ForecastArgs {
    pub station_id: String,
    pub deadline: Duration,
}

/// Run the forecast command.
///
/// The document is printed as pretty JSON exactly as the source sent it.
pub fn run(args: ForecastArgs, config_path: Option<&Path>, verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path, verbose)?;
    runner.log_startup("forecast");

    let resolver = runner.create_resolver(false)?;
    let station_id = args.station_id;

    let forecast = runner.block_on_cancellable(args.deadline, |cancel| async move {
        info!(station = %station_id, "Fetching station forecast");
        resolver
            .forecast(&station_id, &cancel)
            .await
            .map_err(CliError::Forecast)
    })?;

    println!("{}", serde_json::to_string_pretty(&forecast)?);
    Ok(())
}
