//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let api_key = config.source.api_key.as_deref().unwrap_or("");

    format!(
        r#"[source]
; Station lookup endpoint. {{lat}} and {{lon}} are replaced with the query origin.
url = {}
; Station forecast endpoint. {{id}} is replaced with the station id.
forecast_url = {}
; API credential (leave empty if the source needs none)
api_key = {}
; Header the API credential is sent in
api_key_header = {}
; Timeout in seconds for a single request attempt (default: 10)
timeout = {}
; Attempts per lookup before giving up (default: 3)
max_retries = {}
; Wait between attempts in milliseconds (default: 5000)
retry_delay_ms = {}

[cache]
; Cache readings between lookups (default: true)
enabled = {}
; Storage backend:
;   disk   - JSON files in the directory below, shared across runs
;   memory - in-process only
backend = {}
; Directory for the disk backend
directory = {}
; Minutes a cached reading stays fresh (default: 30)
ttl_minutes = {}
; Entries written under another schema version are ignored
schema_version = {}
; Decimal places a coordinate is rounded to when keying the cache (0-6, default: 3)
key_precision = {}

[location]
; Origin used when no location is given or the location source fails
fallback_latitude = {}
fallback_longitude = {}

[aqi]
; Tier classification scale:
;   aqi           - by the computed US AQI value
;   concentration - by corrected PM2.5 concentration
classification = {}

[logging]
; Directory for the log file
directory = {}
; Log file name (cleared at the start of each run)
file = {}
"#,
        config.source.url,
        config.source.forecast_url,
        api_key,
        config.source.api_key_header,
        config.source.timeout,
        config.source.max_retries,
        config.source.retry_delay_ms,
        config.cache.enabled,
        config.cache.backend,
        path_to_string(&config.cache.directory),
        config.cache.ttl_minutes,
        config.cache.schema_version,
        config.cache.key_precision,
        config.location.fallback_latitude,
        config.location.fallback_longitude,
        config.aqi.classification,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

/// Render a path, abbreviating the home directory to `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
