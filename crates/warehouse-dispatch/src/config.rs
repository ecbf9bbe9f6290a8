//! Runtime configuration read from the environment.
//!
//! Every setting has a default, so an empty environment yields a working system.

use crate::model::Coordinate;
use chrono::NaiveTime;
use std::time::Duration;
use thiserror::Error;

const ENV_ACTOR_BUFFER: &str = "WAREHOUSE_ACTOR_BUFFER";
const ENV_DISPATCH_TIMEOUT_SECS: &str = "WAREHOUSE_DISPATCH_TIMEOUT_SECS";
const ENV_DAY_START_UTC: &str = "WAREHOUSE_DAY_START_UTC";
const ENV_RIDER_SPEED_KMH: &str = "WAREHOUSE_RIDER_SPEED_KMH";
const ENV_LATITUDE: &str = "WAREHOUSE_LATITUDE";
const ENV_LONGITUDE: &str = "WAREHOUSE_LONGITUDE";

const DEFAULT_ACTOR_BUFFER: u64 = 32;
const DEFAULT_DISPATCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RIDER_SPEED_KMH: f64 = 22.0;
pub const DEFAULT_WAREHOUSE: Coordinate = Coordinate {
    latitude: 17.405991509704737,
    longitude: 78.40374949215402,
};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got '{raw}'")]
    NotAPositiveInteger { key: &'static str, raw: String },

    #[error("{key} must be a positive number, got '{raw}'")]
    NotAPositiveNumber { key: &'static str, raw: String },

    #[error("{key} must be a coordinate in degrees, got '{raw}'")]
    InvalidCoordinate { key: &'static str, raw: String },

    #[error("{key} must be a time of day as HH:MM, got '{raw}'")]
    InvalidTime { key: &'static str, raw: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseConfig {
    /// Channel capacity of each resource actor.
    pub actor_buffer: usize,
    /// Upper bound on a single planner run.
    pub dispatch_timeout: Duration,
    /// Start of the operating day, UTC.
    pub day_start: NaiveTime,
    pub rider_speed_kmh: f64,
    pub warehouse: Coordinate,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            actor_buffer: DEFAULT_ACTOR_BUFFER as usize,
            dispatch_timeout: Duration::from_secs(DEFAULT_DISPATCH_TIMEOUT_SECS),
            day_start: default_day_start(),
            rider_speed_kmh: DEFAULT_RIDER_SPEED_KMH,
            warehouse: DEFAULT_WAREHOUSE,
        }
    }
}

fn default_day_start() -> NaiveTime {
    NaiveTime::from_hms_opt(4, 30, 0).unwrap_or(NaiveTime::MIN)
}

impl WarehouseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Loads the config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first variable that is set but does not parse,
    /// or parses to a value that is not positive.
    pub fn from_env_with<F>(get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let actor_buffer = parse_positive_u64(&get_env, ENV_ACTOR_BUFFER, DEFAULT_ACTOR_BUFFER)?;
        let timeout_secs = parse_positive_u64(&get_env, ENV_DISPATCH_TIMEOUT_SECS, DEFAULT_DISPATCH_TIMEOUT_SECS)?;
        let rider_speed_kmh = parse_positive_f64(&get_env, ENV_RIDER_SPEED_KMH, defaults.rider_speed_kmh)?;

        let day_start = match get_env(ENV_DAY_START_UTC) {
            Some(raw) => NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|_| ConfigError::InvalidTime {
                key: ENV_DAY_START_UTC,
                raw,
            })?,
            None => defaults.day_start,
        };

        let latitude = parse_degrees(&get_env, ENV_LATITUDE, defaults.warehouse.latitude, 90.0)?;
        let longitude = parse_degrees(&get_env, ENV_LONGITUDE, defaults.warehouse.longitude, 180.0)?;

        Ok(Self {
            actor_buffer: usize::try_from(actor_buffer).map_err(|_| ConfigError::NotAPositiveInteger {
                key: ENV_ACTOR_BUFFER,
                raw: actor_buffer.to_string(),
            })?,
            dispatch_timeout: Duration::from_secs(timeout_secs),
            day_start,
            rider_speed_kmh,
            warehouse: Coordinate::new(latitude, longitude),
        })
    }
}

fn parse_positive_u64<F>(get_env: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = get_env(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(ConfigError::NotAPositiveInteger { key, raw }),
    }
}

fn parse_positive_f64<F>(get_env: &F, key: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = get_env(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed > 0.0 => Ok(parsed),
        _ => Err(ConfigError::NotAPositiveNumber { key, raw }),
    }
}

fn parse_degrees<F>(get_env: &F, key: &'static str, default: f64, limit: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = get_env(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed.abs() <= limit => Ok(parsed),
        _ => Err(ConfigError::InvalidCoordinate { key, raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = WarehouseConfig::from_env_with(|_| None).unwrap();
        assert_eq!(config, WarehouseConfig::default());
        assert_eq!(config.actor_buffer, 32);
        assert_eq!(config.dispatch_timeout, Duration::from_secs(10));
        assert_eq!(config.day_start, NaiveTime::from_hms_opt(4, 30, 0).unwrap());
        assert_eq!(config.rider_speed_kmh, 22.0);
    }

    #[test]
    fn test_overrides() {
        let config = WarehouseConfig::from_env_with(lookup(&[
            (ENV_ACTOR_BUFFER, "8"),
            (ENV_DISPATCH_TIMEOUT_SECS, "3"),
            (ENV_DAY_START_UTC, "06:15"),
            (ENV_RIDER_SPEED_KMH, "18.5"),
            (ENV_LATITUDE, "12.97"),
            (ENV_LONGITUDE, "77.59"),
        ]))
        .unwrap();
        assert_eq!(config.actor_buffer, 8);
        assert_eq!(config.dispatch_timeout, Duration::from_secs(3));
        assert_eq!(config.day_start, NaiveTime::from_hms_opt(6, 15, 0).unwrap());
        assert_eq!(config.rider_speed_kmh, 18.5);
        assert_eq!(config.warehouse, Coordinate::new(12.97, 77.59));
    }

    #[test]
    fn test_rejects_zero_and_garbage() {
        assert_eq!(
            WarehouseConfig::from_env_with(lookup(&[(ENV_ACTOR_BUFFER, "0")])),
            Err(ConfigError::NotAPositiveInteger {
                key: ENV_ACTOR_BUFFER,
                raw: "0".into()
            })
        );
        assert!(matches!(
            WarehouseConfig::from_env_with(lookup(&[(ENV_RIDER_SPEED_KMH, "-3")])),
            Err(ConfigError::NotAPositiveNumber { .. })
        ));
        assert!(matches!(
            WarehouseConfig::from_env_with(lookup(&[(ENV_DAY_START_UTC, "half past four")])),
            Err(ConfigError::InvalidTime { .. })
        ));
        assert!(matches!(
            WarehouseConfig::from_env_with(lookup(&[(ENV_LATITUDE, "91")])),
            Err(ConfigError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_error_names_the_variable() {
        let err = WarehouseConfig::from_env_with(lookup(&[(ENV_DISPATCH_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "WAREHOUSE_DISPATCH_TIMEOUT_SECS must be a positive integer, got 'soon'"
        );
    }
}
