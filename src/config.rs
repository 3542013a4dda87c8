//! Service configuration, read from the environment (and `.env`).

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use crate::middleware::is_well_formed_token;
use crate::names::matcher::DEFAULT_LARGE_LAST_NAME_THRESHOLD;
use crate::names::{MatchTolerance, ReconcileOptions, MAX_RECONCILE_EDIT_DISTANCE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },

    #[error("API_TOKENS entry {index} is malformed (need at least 32 characters of A-Z, a-z, 0-9, '-' or '_')")]
    MalformedToken { index: usize },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Accepted bearer tokens. Empty means no authentication.
    pub api_tokens: Vec<String>,
    /// Defaults for pairwise and author-list requests.
    pub tolerance: MatchTolerance,
    /// Default for `canon_maps` requests.
    pub reconcile_max_edit_distance: usize,
    pub author_list_separator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            api_tokens: Vec::new(),
            tolerance: MatchTolerance::default(),
            reconcile_max_edit_distance: ReconcileOptions::default().max_edit_distance,
            author_list_separator: ";".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_tokens: Vec<String> = get("API_TOKENS")
            .map(|tokens| {
                tokens
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        if let Some(index) = api_tokens.iter().position(|t| !is_well_formed_token(t)) {
            return Err(ConfigError::MalformedToken { index });
        }

        let non_last = parse_or(&get, "MATCH_MAX_EDIT_DISTANCE", defaults.tolerance.non_last_max_edit_distance)?;
        let last = match get("MATCH_MAX_LAST_EDIT_DISTANCE") {
            Some(value) => Some(parse_value("MATCH_MAX_LAST_EDIT_DISTANCE", value)?),
            None => None,
        };

        let reconcile_max_edit_distance = parse_or(
            &get,
            "RECONCILE_MAX_EDIT_DISTANCE",
            defaults.reconcile_max_edit_distance,
        )?;
        if reconcile_max_edit_distance > MAX_RECONCILE_EDIT_DISTANCE {
            return Err(ConfigError::Invalid {
                key: "RECONCILE_MAX_EDIT_DISTANCE",
                value: reconcile_max_edit_distance.to_string(),
            });
        }

        Ok(Config {
            bind_addr: parse_or(&get, "BIND_ADDR", defaults.bind_addr)?,
            api_tokens,
            tolerance: MatchTolerance {
                non_last_max_edit_distance: non_last,
                last_max_edit_distance: last,
                large_last_name_threshold: parse_or(
                    &get,
                    "MATCH_LARGE_LAST_NAME_THRESHOLD",
                    DEFAULT_LARGE_LAST_NAME_THRESHOLD,
                )?,
            },
            reconcile_max_edit_distance,
            author_list_separator: get("AUTHOR_LIST_SEPARATOR").unwrap_or(defaults.author_list_separator),
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => parse_value(key, value),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    const TOKEN: &str = "0123456789abcdef0123456789abcdef";

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert!(config.api_tokens.is_empty());
        assert_eq!(config.tolerance, MatchTolerance::default());
        assert_eq!(config.reconcile_max_edit_distance, 1);
        assert_eq!(config.author_list_separator, ";");
    }

    #[test]
    fn test_overrides() {
        let tokens = format!("{TOKEN}, {TOKEN}-2 ,");
        let config = Config::from_lookup(lookup(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("API_TOKENS", tokens.as_str()),
            ("MATCH_MAX_EDIT_DISTANCE", "1"),
            ("MATCH_MAX_LAST_EDIT_DISTANCE", "2"),
            ("MATCH_LARGE_LAST_NAME_THRESHOLD", "9"),
            ("RECONCILE_MAX_EDIT_DISTANCE", "2"),
            ("AUTHOR_LIST_SEPARATOR", "|"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.api_tokens, vec![TOKEN.to_string(), format!("{TOKEN}-2")]);
        assert_eq!(config.tolerance.non_last_max_edit_distance, 1);
        assert_eq!(config.tolerance.last_edit_distance(), 2);
        assert_eq!(config.tolerance.large_last_name_threshold, 9);
        assert_eq!(config.reconcile_max_edit_distance, 2);
        assert_eq!(config.author_list_separator, "|");
    }

    #[test]
    fn test_reconcile_default_is_bounded() {
        assert_eq!(
            Config::from_lookup(lookup(&[("RECONCILE_MAX_EDIT_DISTANCE", "11")])).unwrap_err(),
            ConfigError::Invalid {
                key: "RECONCILE_MAX_EDIT_DISTANCE",
                value: "11".to_string(),
            }
        );
        let config = Config::from_lookup(lookup(&[("RECONCILE_MAX_EDIT_DISTANCE", "10")])).unwrap();
        assert_eq!(config.reconcile_max_edit_distance, MAX_RECONCILE_EDIT_DISTANCE);
    }

    #[test]
    fn test_invalid_values_fail_fast() {
        assert_eq!(
            Config::from_lookup(lookup(&[("MATCH_MAX_EDIT_DISTANCE", "-1")])).unwrap_err(),
            ConfigError::Invalid {
                key: "MATCH_MAX_EDIT_DISTANCE",
                value: "-1".to_string()
            }
        );
        assert!(Config::from_lookup(lookup(&[("BIND_ADDR", "nowhere")])).is_err());
        assert_eq!(
            Config::from_lookup(lookup(&[("API_TOKENS", "short")])).unwrap_err(),
            ConfigError::MalformedToken { index: 0 }
        );
    }

    #[test]
    #[serial]
    fn test_from_env() {
        env::set_var("RECONCILE_MAX_EDIT_DISTANCE", "3");
        env::remove_var("API_TOKENS");
        let config = Config::from_env().unwrap();
        env::remove_var("RECONCILE_MAX_EDIT_DISTANCE");
        assert_eq!(config.reconcile_max_edit_distance, 3);
        assert!(config.api_tokens.is_empty());
    }
}
