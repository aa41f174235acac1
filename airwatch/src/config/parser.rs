//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::{Ini, Properties};
use std::path::PathBuf;
use std::str::FromStr;

use super::defaults::MAX_KEY_PRECISION;
use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [source] section
    if let Some(section) = ini.section(Some("source")) {
        if let Some(v) = value(section, "url") {
            if v.is_empty() {
                return Err(invalid("source", "url", v, "must not be empty"));
            }
            config.source.url = v.to_string();
        }
        if let Some(v) = value(section, "forecast_url") {
            if v.is_empty() {
                return Err(invalid("source", "forecast_url", v, "must not be empty"));
            }
            config.source.forecast_url = v.to_string();
        }
        if let Some(v) = value(section, "api_key") {
            config.source.api_key = (!v.is_empty()).then(|| v.to_string());
        }
        if let Some(v) = value(section, "api_key_header") {
            if !v.is_empty() {
                config.source.api_key_header = v.to_string();
            }
        }
        if let Some(v) = value(section, "timeout") {
            config.source.timeout = parse_positive(v).ok_or_else(|| {
                invalid("source", "timeout", v, "must be a positive integer (seconds)")
            })?;
        }
        if let Some(v) = value(section, "max_retries") {
            config.source.max_retries = parse_positive(v)
                .ok_or_else(|| invalid("source", "max_retries", v, "must be a positive integer"))?;
        }
        if let Some(v) = value(section, "retry_delay_ms") {
            config.source.retry_delay_ms = v.parse().map_err(|_| {
                invalid("source", "retry_delay_ms", v, "must be a non-negative integer (milliseconds)")
            })?;
        }
    }

    // [cache] section
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = value(section, "enabled") {
            config.cache.enabled = parse_bool(v);
        }
        if let Some(v) = value(section, "backend") {
            config.cache.backend = v
                .parse()
                .map_err(|_| invalid("cache", "backend", v, "must be 'disk' or 'memory'"))?;
        }
        if let Some(v) = value(section, "directory") {
            if !v.is_empty() {
                config.cache.directory = expand_tilde(v);
            }
        }
        if let Some(v) = value(section, "ttl_minutes") {
            config.cache.ttl_minutes = v.parse().map_err(|_| {
                invalid("cache", "ttl_minutes", v, "must be a non-negative integer (minutes)")
            })?;
        }
        if let Some(v) = value(section, "schema_version") {
            config.cache.schema_version = v
                .parse()
                .map_err(|_| invalid("cache", "schema_version", v, "must be a non-negative integer"))?;
        }
        if let Some(v) = value(section, "key_precision") {
            config.cache.key_precision = v
                .parse::<usize>()
                .ok()
                .filter(|p| *p <= MAX_KEY_PRECISION)
                .ok_or_else(|| {
                    invalid(
                        "cache",
                        "key_precision",
                        v,
                        &format!("must be an integer between 0 and {}", MAX_KEY_PRECISION),
                    )
                })?;
        }
    }

    // [location] section
    if let Some(section) = ini.section(Some("location")) {
        if let Some(v) = value(section, "fallback_latitude") {
            config.location.fallback_latitude = parse_in_range(v, -90.0, 90.0).ok_or_else(|| {
                invalid("location", "fallback_latitude", v, "must be a number between -90 and 90")
            })?;
        }
        if let Some(v) = value(section, "fallback_longitude") {
            config.location.fallback_longitude =
                parse_in_range(v, -180.0, 180.0).ok_or_else(|| {
                    invalid(
                        "location",
                        "fallback_longitude",
                        v,
                        "must be a number between -180 and 180",
                    )
                })?;
        }
    }

    // [aqi] section
    if let Some(section) = ini.section(Some("aqi")) {
        if let Some(v) = value(section, "classification") {
            config.aqi.classification = FromStr::from_str(v).map_err(|_| {
                invalid("aqi", "classification", v, "must be 'aqi' or 'concentration'")
            })?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = value(section, "directory") {
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = value(section, "file") {
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

/// Trimmed value with any trailing `; comment` removed.
fn value<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section.get(key).map(|raw| {
        let raw = match raw.find(" ;") {
            Some(idx) => &raw[..idx],
            None => raw,
        };
        raw.trim()
    })
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_positive<T>(value: &str) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    value.parse::<T>().ok().filter(|n| *n > T::default())
}

fn parse_in_range(value: &str, min: f64, max: f64) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= min && *n <= max)
}

/// Parse a boolean value from a config string.
/// Accepts: true/false, yes/no, 1/0, on/off (case-insensitive)
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aqi::ClassificationMode;
    use crate::config::settings::CacheBackend;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(content).unwrap();
        parse_ini(&ini)
    }

    fn assert_invalid(content: &str, expected_section: &str, expected_key: &str) {
        match parse(content) {
            Err(ConfigFileError::InvalidValue { section, key, .. }) => {
                assert_eq!(section, expected_section);
                assert_eq!(key, expected_key);
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_partial_config() {
        let config = parse(
            "[source]\ntimeout = 20\n\n[aqi]\nclassification = concentration\n",
        )
        .unwrap();

        assert_eq!(config.source.timeout, 20);
        assert_eq!(config.source.max_retries, 3);
        assert_eq!(config.aqi.classification, ClassificationMode::Concentration);
        assert_eq!(config.cache, ConfigFile::default().cache);
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
[source]
url = http://localhost:8080/near/{lat}/{lon}
forecast_url = http://localhost:8080/forecast/{id}
api_key = s3cret
api_key_header = Authorization-Key
timeout = 5
max_retries = 4
retry_delay_ms = 250

[cache]
enabled = no
backend = memory
directory = /var/cache/airwatch
ttl_minutes = 15
schema_version = 2
key_precision = 2

[location]
fallback_latitude = 13.7563
fallback_longitude = 100.5018

[logging]
directory = /tmp/aw
file = run.log
"#,
        )
        .unwrap();

        assert_eq!(config.source.url, "http://localhost:8080/near/{lat}/{lon}");
        assert_eq!(config.source.forecast_url, "http://localhost:8080/forecast/{id}");
        assert_eq!(config.source.api_key.as_deref(), Some("s3cret"));
        assert_eq!(config.source.api_key_header, "Authorization-Key");
        assert_eq!(config.source.timeout, 5);
        assert_eq!(config.source.max_retries, 4);
        assert_eq!(config.source.retry_delay_ms, 250);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.cache.directory, PathBuf::from("/var/cache/airwatch"));
        assert_eq!(config.cache.ttl_minutes, 15);
        assert_eq!(config.cache.schema_version, 2);
        assert_eq!(config.cache.key_precision, 2);
        assert_eq!(config.location.fallback_latitude, 13.7563);
        assert_eq!(config.location.fallback_longitude, 100.5018);
        assert_eq!(config.logging.directory, PathBuf::from("/tmp/aw"));
        assert_eq!(config.logging.file, "run.log");
    }

    #[test]
    fn test_inline_comment_is_ignored() {
        let config = parse("[cache]\nbackend = memory ; disk | memory\n").unwrap();
        assert_eq!(config.cache.backend, CacheBackend::Memory);
    }

    #[test]
    fn test_blank_api_key_is_none() {
        let config = parse("[source]\napi_key =\n").unwrap();
        assert!(config.source.api_key.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert_invalid("[source]\ntimeout = 0\n", "source", "timeout");
        assert_invalid("[source]\ntimeout = soon\n", "source", "timeout");
        assert_invalid("[source]\nmax_retries = 0\n", "source", "max_retries");
        assert_invalid("[source]\nurl =\n", "source", "url");
        assert_invalid("[source]\nforecast_url =\n", "source", "forecast_url");
        assert_invalid("[cache]\nbackend = redis\n", "cache", "backend");
        assert_invalid("[cache]\nkey_precision = 9\n", "cache", "key_precision");
        assert_invalid("[cache]\nttl_minutes = -1\n", "cache", "ttl_minutes");
        assert_invalid("[location]\nfallback_latitude = 91\n", "location", "fallback_latitude");
        assert_invalid(
            "[location]\nfallback_longitude = abc\n",
            "location",
            "fallback_longitude",
        );
        assert_invalid("[aqi]\nclassification = nowcast\n", "aqi", "classification");
    }

    #[test]
    fn test_parse_bool_values() {
        for v in ["true", "1", "yes", "on", " TRUE "] {
            assert!(parse_bool(v), "{} should be true", v);
        }
        for v in ["false", "0", "no", "off", "maybe"] {
            assert!(!parse_bool(v), "{} should be false", v);
        }
    }

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/test/path");
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.to_string_lossy().ends_with("test/path"));

        let path = expand_tilde("/absolute/path");
        assert_eq!(path, PathBuf::from("/absolute/path"));
    }
}
