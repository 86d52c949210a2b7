use crate::signals_core::DEFAULT_WINDOW_DAYS;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Rows printed by the correlation listing unless overridden
pub const DEFAULT_LISTING_LIMIT: usize = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },
}

/// Configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct SignalsConfig {
    /// Path to the SQLite fact store
    pub db_path: PathBuf,

    /// Correlation window in days (inclusive, either side of a status event)
    pub window_days: u32,

    /// Default row count for the correlation listing
    pub listing_limit: usize,
}

impl Default for SignalsConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("signals.db"),
            window_days: DEFAULT_WINDOW_DAYS,
            listing_limit: DEFAULT_LISTING_LIMIT,
        }
    }
}

impl SignalsConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `SIGNALS_DB_PATH` (default: signals.db)
    /// - `SIGNALS_WINDOW_DAYS` (default: 5)
    /// - `SIGNALS_LISTING_LIMIT` (default: 50, must be >= 1)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`SignalsConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let db_path = lookup("SIGNALS_DB_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let window_days = match lookup("SIGNALS_WINDOW_DAYS") {
            Some(raw) => parse_var("SIGNALS_WINDOW_DAYS", &raw)?,
            None => defaults.window_days,
        };

        let listing_limit = match lookup("SIGNALS_LISTING_LIMIT") {
            Some(raw) => match parse_var::<usize>("SIGNALS_LISTING_LIMIT", &raw)? {
                0 => return Err(invalid("SIGNALS_LISTING_LIMIT", &raw)),
                limit => limit,
            },
            None => defaults.listing_limit,
        };

        Ok(Self {
            db_path,
            window_days,
            listing_limit,
        })
    }
}

fn invalid(var: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        var: var.to_string(),
        value: value.to_string(),
    }
}

fn parse_var<T: std::str::FromStr>(var: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| invalid(var, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SignalsConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.db_path, PathBuf::from("signals.db"));
        assert_eq!(config.window_days, 5);
        assert_eq!(config.listing_limit, 50);
    }

    #[test]
    fn test_custom_config() {
        let config = SignalsConfig::from_lookup(lookup_from(&[
            ("SIGNALS_DB_PATH", "/tmp/test.db"),
            ("SIGNALS_WINDOW_DAYS", "7"),
            ("SIGNALS_LISTING_LIMIT", " 10 "),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/test.db"));
        assert_eq!(config.window_days, 7);
        assert_eq!(config.listing_limit, 10);
    }

    #[test]
    fn test_invalid_values() {
        let err =
            SignalsConfig::from_lookup(lookup_from(&[("SIGNALS_WINDOW_DAYS", "-1")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: "SIGNALS_WINDOW_DAYS".to_string(),
                value: "-1".to_string(),
            }
        );

        for raw in ["0", "many"] {
            let lookup = lookup_from(&[("SIGNALS_LISTING_LIMIT", raw)]);
            assert!(SignalsConfig::from_lookup(lookup).is_err());
        }
    }

    #[test]
    fn test_blank_db_path_uses_default() {
        let config = SignalsConfig::from_lookup(lookup_from(&[("SIGNALS_DB_PATH", "  ")])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("signals.db"));
    }
}
