//! # Configuration State
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line (`[DATABASE]`, `--verbose`, `--no-migrate`)
//! 2. Environment variables (`RENTAL_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after initialization.

use std::collections::HashMap;

use rental_db::TrackingDefaults;
use thiserror::Error;

/// Number of orders shown by "View Past 5 Rental Orders".
pub const RECENT_ORDERS_ENV: &str = "RENTAL_RECENT_ORDERS";

/// Courier written into new tracking records.
pub const COURIER_ENV: &str = "RENTAL_COURIER";

/// Location written into new tracking records.
pub const INITIAL_LOCATION_ENV: &str = "RENTAL_INITIAL_LOCATION";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

/// Environment lookups, swappable in tests.
pub trait ConfigEnv {
    fn string(&self, name: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl ConfigEnv for ProcessEnv {
    fn string(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl ConfigEnv for HashMap<String, String> {
    fn string(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigState {
    /// How many orders "View Past 5 Rental Orders" lists
    pub recent_orders: u32,

    /// Courier and location of every new tracking record
    pub tracking_defaults: TrackingDefaults,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            recent_orders: 5,
            tracking_defaults: TrackingDefaults::default(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `RENTAL_RECENT_ORDERS`: positive integer (default 5)
    /// - `RENTAL_COURIER`: courier of new orders (default `CourierX`)
    /// - `RENTAL_INITIAL_LOCATION`: location of new orders (default `Warehouse`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(&ProcessEnv)
    }

    /// Loads configuration from a custom environment source.
    pub fn from_env_with(env: &impl ConfigEnv) -> Result<Self, ConfigError> {
        let mut config = ConfigState::default();

        if let Some(raw) = env.string(RECENT_ORDERS_ENV) {
            config.recent_orders = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue(RECENT_ORDERS_ENV.to_string()))?;
        }

        if let Some(courier) = env.string(COURIER_ENV) {
            config.tracking_defaults.courier_name = non_blank(COURIER_ENV, courier)?;
        }

        if let Some(location) = env.string(INITIAL_LOCATION_ENV) {
            config.tracking_defaults.current_location = non_blank(INITIAL_LOCATION_ENV, location)?;
        }

        Ok(config)
    }
}

fn non_blank(name: &str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue(name.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_env_with(&env(&[])).unwrap();
        assert_eq!(config, ConfigState::default());
        assert_eq!(config.recent_orders, 5);
        assert_eq!(config.tracking_defaults.courier_name, "CourierX");
        assert_eq!(config.tracking_defaults.current_location, "Warehouse");
    }

    #[test]
    fn test_overrides() {
        let config = ConfigState::from_env_with(&env(&[
            (RECENT_ORDERS_ENV, "10"),
            (COURIER_ENV, " UPS "),
            (INITIAL_LOCATION_ENV, "Dock 4"),
        ]))
        .unwrap();
        assert_eq!(config.recent_orders, 10);
        assert_eq!(config.tracking_defaults.courier_name, "UPS");
        assert_eq!(config.tracking_defaults.current_location, "Dock 4");
    }

    #[test]
    fn test_invalid_values() {
        for bad in ["0", "-3", "five", ""] {
            let err = ConfigState::from_env_with(&env(&[(RECENT_ORDERS_ENV, bad)])).unwrap_err();
            assert_eq!(err.to_string(), "Invalid value for RENTAL_RECENT_ORDERS");
        }

        let err = ConfigState::from_env_with(&env(&[(COURIER_ENV, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(name) if name == COURIER_ENV));
    }
}
