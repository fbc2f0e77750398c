//! Runtime configuration read from the environment.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, warn};

use crate::ids::IdFormat;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_COUNTER_PATH: &str = "tests/last-atl-number";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for identifier formats and the remote counter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the lab management API.
    pub api_url: String,
    /// Path of the counter endpoint, relative to `api_url`.
    pub counter_path: String,
    /// Timeout for a single counter request.
    pub timeout: Duration,
    /// Prefixes and suffixes for generated identifiers.
    pub format: IdFormat,
    /// Directory to record cassettes into, if any.
    pub record_dir: Option<PathBuf>,
    /// Cassette to replay every port from, if any.
    pub replay_cassette: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            counter_path: DEFAULT_COUNTER_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            format: IdFormat::default(),
            record_dir: None,
            replay_cassette: None,
        }
    }
}

impl Config {
    /// Loads configuration from `LABID_*` environment variables.
    ///
    /// Unset or unparsable values fall back to their defaults.
    #[must_use]
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            api_url: string_or("LABID_API_URL", defaults.api_url),
            counter_path: string_or("LABID_COUNTER_PATH", defaults.counter_path),
            timeout: Duration::from_secs(parse_or("LABID_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            format: IdFormat {
                prefix: string_or("LABID_PREFIX", defaults.format.prefix),
                ulr_prefix: string_or("LABID_ULR_PREFIX", defaults.format.ulr_prefix),
                ulr_suffix: string_or("LABID_ULR_SUFFIX", defaults.format.ulr_suffix),
            },
            record_dir: env::var("LABID_RECORD").ok().map(PathBuf::from),
            replay_cassette: env::var("LABID_REPLAY").ok().map(PathBuf::from),
        }
    }

    /// Full URL of the counter endpoint.
    #[must_use]
    pub fn counter_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            self.counter_path.trim_start_matches('/')
        )
    }
}

fn string_or(key: &str, default: String) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        Ok(_) => {
            warn!("{key} is empty, using default: {default}");
            default
        }
        Err(_) => {
            debug!("{key} not set, using default: {default}");
            default
        }
    }
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}; using default: {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_url_joins_without_double_slash() {
        let config = Config {
            api_url: "https://lab.example/api/".into(),
            counter_path: "/tests/last-atl-number".into(),
            ..Config::default()
        };
        assert_eq!(config.counter_url(), "https://lab.example/api/tests/last-atl-number");
    }

    #[test]
    fn defaults_match_house_format() {
        let config = Config::default();
        assert_eq!(config.format.prefix, "ATL");
        assert_eq!(config.format.ulr_prefix, "TC8749");
        assert_eq!(config.format.ulr_suffix, "F");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn unparsable_value_falls_back() {
        std::env::set_var("LABID_TEST_PARSE_OR", "soon");
        let value: u64 = parse_or("LABID_TEST_PARSE_OR", 7);
        std::env::remove_var("LABID_TEST_PARSE_OR");
        assert_eq!(value, 7);
    }
}
