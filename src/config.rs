use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use chrono_tz::Tz;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://transport.opendata.ch";
pub const DEPARTURE_CAP: usize = 3;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    /// Connections requested per stationboard call, before destination filtering.
    pub station_limit: u32,
    pub max_departures: usize,
    pub http_timeout: Duration,
    pub refresh_interval: Duration,
    pub bind_addr: SocketAddr,
    pub preferences_path: PathBuf,
    pub display_tz: Tz,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            station_limit: 10,
            max_departures: DEPARTURE_CAP,
            http_timeout: Duration::from_secs(10),
            refresh_interval: Duration::from_secs(15 * 60),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            preferences_path: PathBuf::from("preferences.json"),
            display_tz: chrono_tz::Europe::Zurich,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment. Call `dotenvy::dotenv()`
    /// first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        Ok(Self {
            api_base_url: env::var("TRANSPORT_API_URL").unwrap_or(defaults.api_base_url),
            station_limit: parse_var("STATIONBOARD_LIMIT")?.unwrap_or(defaults.station_limit),
            max_departures: parse_var("MAX_DEPARTURES")?
                .map(|raw: String| max_departures("MAX_DEPARTURES", &raw))
                .transpose()?
                .unwrap_or(defaults.max_departures),
            http_timeout: parse_var("HTTP_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            refresh_interval: parse_var("REFRESH_INTERVAL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.refresh_interval),
            bind_addr: parse_var("BIND_ADDR")?.unwrap_or(defaults.bind_addr),
            preferences_path: env::var("PREFERENCES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.preferences_path),
            display_tz: parse_var("DISPLAY_TZ")?.unwrap_or(defaults.display_tz),
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => parse_value(name, &value).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_value<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        })
}

/// Results never exceed three departures, and zero would hide every one.
fn max_departures(name: &'static str, value: &str) -> Result<usize, ConfigError> {
    match parse_value::<usize>(name, value)? {
        max @ 1..=DEPARTURE_CAP => Ok(max),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stationboard_usage() {
        let config = Config::default();

        assert_eq!(config.station_limit, 10);
        assert_eq!(config.max_departures, 3);
        assert_eq!(config.refresh_interval, Duration::from_secs(900));
        assert_eq!(config.display_tz, chrono_tz::Europe::Zurich);
    }

    #[test]
    fn max_departures_accepts_one_to_three() {
        assert_eq!(max_departures("MAX_DEPARTURES", "1").unwrap(), 1);
        assert_eq!(max_departures("MAX_DEPARTURES", " 3 ").unwrap(), 3);
    }

    #[test]
    fn max_departures_rejects_out_of_range() {
        for raw in ["0", "4", "8", "-1", "three"] {
            let result = max_departures("MAX_DEPARTURES", raw);
            assert!(
                matches!(
                    &result,
                    Err(ConfigError::InvalidValue { name: "MAX_DEPARTURES", value }) if value == raw
                ),
                "{raw} should be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn malformed_value_is_invalid() {
        let result = parse_value::<u32>("STATIONBOARD_LIMIT", "ten");

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "STATIONBOARD_LIMIT", .. })
        ));
    }

    #[test]
    fn unset_variable_is_none() {
        let value = parse_var::<u32>("TRAM_DISPLAY_TEST_SURELY_UNSET").unwrap();
        assert!(value.is_none());
    }
}
