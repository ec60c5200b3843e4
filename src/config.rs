//! Runtime configuration from the environment (and `.env` when present)

use crate::error::BuddyError;
use crate::Result;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_THINKING_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_REPLY_DELAY_MS: u64 = 3_000;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory for the file store; `None` keeps everything in memory
    pub data_dir: Option<PathBuf>,
    pub thinking_interval: Duration,
    pub reply_delay: Duration,
    pub notifications: bool,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            thinking_interval: Duration::from_millis(DEFAULT_THINKING_INTERVAL_MS),
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            notifications: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let thinking_interval = match lookup("BUDGET_BUDDY_THINKING_INTERVAL_MS") {
            Some(raw) => Duration::from_millis(parse_millis("BUDGET_BUDDY_THINKING_INTERVAL_MS", &raw)?),
            None => defaults.thinking_interval,
        };

        let reply_delay = match lookup("BUDGET_BUDDY_REPLY_DELAY_MS") {
            Some(raw) => Duration::from_millis(parse_millis("BUDGET_BUDDY_REPLY_DELAY_MS", &raw)?),
            None => defaults.reply_delay,
        };

        let notifications = match lookup("BUDGET_BUDDY_NOTIFICATIONS") {
            Some(raw) => parse_flag("BUDGET_BUDDY_NOTIFICATIONS", &raw)?,
            None => defaults.notifications,
        };

        Ok(Self {
            data_dir: lookup("BUDGET_BUDDY_DATA_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            thinking_interval,
            reply_delay,
            notifications,
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
        })
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| BuddyError::Config(format!("{} must be a whole number of milliseconds, got {:?}", key, raw)))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(BuddyError::Config(format!("{} must be true or false, got {:?}", key, raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.thinking_interval, Duration::from_secs(1));
        assert_eq!(config.reply_delay, Duration::from_secs(3));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BUDGET_BUDDY_DATA_DIR", "/tmp/bb"),
            ("BUDGET_BUDDY_THINKING_INTERVAL_MS", "250"),
            ("BUDGET_BUDDY_REPLY_DELAY_MS", "0"),
            ("BUDGET_BUDDY_NOTIFICATIONS", "off"),
            ("RUST_LOG", "budget_buddy=debug"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/bb")));
        assert_eq!(config.thinking_interval, Duration::from_millis(250));
        assert_eq!(config.reply_delay, Duration::ZERO);
        assert!(!config.notifications);
        assert_eq!(config.log_filter, "budget_buddy=debug");
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = AppConfig::from_lookup(lookup_from(&[("BUDGET_BUDDY_REPLY_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, BuddyError::Config(_)));

        let err = AppConfig::from_lookup(lookup_from(&[("BUDGET_BUDDY_NOTIFICATIONS", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, BuddyError::Config(_)));
    }
}
