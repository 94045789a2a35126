use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::application::feed::FeedConfig;
use crate::domain::pagination::DEFAULT_PAGE_SIZE;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} is not a valid number: {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be a probability between 0 and 1, got {value}")]
    InvalidProbability { key: &'static str, value: f64 },
    #[error("{key} must be greater than zero")]
    ZeroInterval { key: &'static str },
}

/// Everything the binary reads from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub initial_orders: usize,
    pub page_size: usize,
    pub feed: FeedConfig,
    pub snapshot_interval: Duration,
    pub export_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            initial_orders: 100,
            page_size: DEFAULT_PAGE_SIZE,
            feed: FeedConfig::default(),
            snapshot_interval: Duration::from_secs(30),
            export_path: None,
        }
    }
}

impl DashboardConfig {
    /// Read the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let page_size = parse_or(&var, "PAGE_SIZE", defaults.page_size)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidNumber {
                key: "PAGE_SIZE",
                value: "0".to_string(),
            });
        }

        let feed = FeedConfig {
            arrival_interval: interval_or(
                &var,
                "ARRIVAL_INTERVAL_SECS",
                defaults.feed.arrival_interval,
            )?,
            arrival_probability: probability_or(
                &var,
                "ARRIVAL_PROBABILITY",
                defaults.feed.arrival_probability,
            )?,
            progression_interval: interval_or(
                &var,
                "PROGRESSION_INTERVAL_SECS",
                defaults.feed.progression_interval,
            )?,
            progression_probability: probability_or(
                &var,
                "PROGRESSION_PROBABILITY",
                defaults.feed.progression_probability,
            )?,
            seed: var("FEED_SEED")
                .map(|value| parse("FEED_SEED", &value))
                .transpose()?,
        };

        Ok(Self {
            initial_orders: parse_or(&var, "ORDER_COUNT", defaults.initial_orders)?,
            page_size,
            feed,
            snapshot_interval: interval_or(
                &var,
                "SNAPSHOT_INTERVAL_SECS",
                defaults.snapshot_interval,
            )?,
            export_path: var("EXPORT_PATH").map(PathBuf::from),
        })
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}

fn parse_or<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(value) => parse(key, &value),
        None => Ok(default),
    }
}

fn interval_or<F>(var: &F, key: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs: u64 = parse_or(var, key, default.as_secs())?;
    if secs == 0 {
        return Err(ConfigError::ZeroInterval { key });
    }
    Ok(Duration::from_secs(secs))
}

fn probability_or<F>(var: &F, key: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value: f64 = parse_or(var, key, default)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidProbability { key, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<DashboardConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashboardConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = load(&[]).expect("defaults should load");
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.initial_orders, 100);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.feed.arrival_interval, Duration::from_secs(20));
        assert_eq!(config.feed.progression_probability, 0.1);
        assert!(config.feed.seed.is_none());
        assert!(config.export_path.is_none());
    }

    #[test]
    fn values_override_defaults() {
        let config = load(&[
            ("ORDER_COUNT", "25"),
            ("PAGE_SIZE", "10"),
            ("ARRIVAL_INTERVAL_SECS", "5"),
            ("ARRIVAL_PROBABILITY", "1"),
            ("PROGRESSION_PROBABILITY", "0"),
            ("FEED_SEED", "42"),
            ("EXPORT_PATH", "/tmp/orders.csv"),
        ])
        .expect("config should load");

        assert_eq!(config.initial_orders, 25);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.feed.arrival_interval, Duration::from_secs(5));
        assert_eq!(config.feed.arrival_probability, 1.0);
        assert_eq!(config.feed.progression_probability, 0.0);
        assert_eq!(config.feed.seed, Some(42));
        assert_eq!(config.export_path, Some(PathBuf::from("/tmp/orders.csv")));
    }

    #[test]
    fn blank_values_are_treated_as_unset() {
        let config =
            load(&[("ORDER_COUNT", "  "), ("EXPORT_PATH", "")]).expect("config should load");
        assert_eq!(config.initial_orders, 100);
        assert!(config.export_path.is_none());
    }

    #[test]
    fn unparsable_number_is_rejected() {
        let err = load(&[("ORDER_COUNT", "lots")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                key: "ORDER_COUNT",
                value: "lots".to_string()
            }
        );
    }

    #[test]
    fn probability_out_of_range_is_rejected() {
        let err = load(&[("ARRIVAL_PROBABILITY", "1.5")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidProbability { key: "ARRIVAL_PROBABILITY", .. }
        ));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = load(&[("SNAPSHOT_INTERVAL_SECS", "0")]).unwrap_err();
        assert_eq!(err, ConfigError::ZeroInterval { key: "SNAPSHOT_INTERVAL_SECS" });
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(load(&[("PAGE_SIZE", "0")]).is_err());
    }

    #[test]
    fn error_messages_name_the_key() {
        let err = load(&[("FEED_SEED", "abc")]).unwrap_err();
        assert_eq!(err.to_string(), "FEED_SEED is not a valid number: \"abc\"");
    }
}
