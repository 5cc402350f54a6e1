//! Configuration loaded from environment variables with defaults.
//!
//! | Variable | Default |
//! |---|---|
//! | `MARKET_HTTP_ADDR` | `0.0.0.0:8000` |
//! | `MARKET_SWEEP_INTERVAL_SECS` | `300` |
//! | `MARKET_ORDER_EXPIRY_SECS` | `3600` |
//! | `MARKET_ACTOR_BUFFER` | `32` |
//!
//! A `.env` file in the working directory is read first, if present.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const HTTP_ADDR: &str = "MARKET_HTTP_ADDR";
pub const SWEEP_INTERVAL_SECS: &str = "MARKET_SWEEP_INTERVAL_SECS";
pub const ORDER_EXPIRY_SECS: &str = "MARKET_ORDER_EXPIRY_SECS";
pub const ACTOR_BUFFER: &str = "MARKET_ACTOR_BUFFER";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub http_addr: SocketAddr,
    /// Period of the expiry sweeper.
    pub sweep_interval: Duration,
    /// How long an order may stay open before the sweeper expires it.
    pub order_expiry: Duration,
    /// Channel capacity of each resource actor.
    pub actor_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            sweep_interval: Duration::from_secs(300),
            order_expiry: Duration::from_secs(3600),
            actor_buffer: 32,
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            http_addr: parse_or(&lookup, HTTP_ADDR, defaults.http_addr)?,
            sweep_interval: positive_secs(&lookup, SWEEP_INTERVAL_SECS, defaults.sweep_interval)?,
            order_expiry: expiry_secs(&lookup, defaults.order_expiry)?,
            actor_buffer: positive(&lookup, ACTOR_BUFFER, defaults.actor_buffer)?,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

fn positive<T: FromStr + PartialEq + Default>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    let value = parse_or(lookup, key, default)?;
    if value == T::default() {
        return Err(ConfigError::Invalid {
            key,
            value: "0".into(),
        });
    }
    Ok(value)
}

fn positive_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    positive(lookup, key, default.as_secs()).map(Duration::from_secs)
}

/// The expiry is subtracted from wall-clock time, so it must fit a `TimeDelta`.
fn expiry_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let expiry = positive_secs(lookup, ORDER_EXPIRY_SECS, default)?;
    if chrono::TimeDelta::from_std(expiry).is_err() {
        return Err(ConfigError::Invalid {
            key: ORDER_EXPIRY_SECS,
            value: expiry.as_secs().to_string(),
        });
    }
    Ok(expiry)
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
    fn defaults_apply_when_unset() {
        assert_eq!(Config::from_lookup(lookup(&[])).unwrap(), Config::default());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            (HTTP_ADDR, "127.0.0.1:9000"),
            (SWEEP_INTERVAL_SECS, "60"),
            (ORDER_EXPIRY_SECS, " 120 "),
            (ACTOR_BUFFER, "8"),
        ]))
        .unwrap();
        assert_eq!(config.http_addr.port(), 9000);
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
        assert_eq!(config.order_expiry, Duration::from_secs(120));
        assert_eq!(config.actor_buffer, 8);
    }

    #[test]
    fn rejects_garbage_and_zero() {
        assert_eq!(
            Config::from_lookup(lookup(&[(SWEEP_INTERVAL_SECS, "soon")])),
            Err(ConfigError::Invalid {
                key: SWEEP_INTERVAL_SECS,
                value: "soon".into()
            })
        );
        assert!(Config::from_lookup(lookup(&[(ORDER_EXPIRY_SECS, "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[(ACTOR_BUFFER, "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[(HTTP_ADDR, "localhost")])).is_err());
    }

    #[test]
    fn rejects_expiry_beyond_time_range() {
        let max = u64::MAX.to_string();
        assert_eq!(
            Config::from_lookup(lookup(&[(ORDER_EXPIRY_SECS, max.as_str())])),
            Err(ConfigError::Invalid {
                key: ORDER_EXPIRY_SECS,
                value: max.clone()
            })
        );
        let ten_years = (10 * 365 * 24 * 3600).to_string();
        assert!(Config::from_lookup(lookup(&[(ORDER_EXPIRY_SECS, ten_years.as_str())])).is_ok());
    }
}
