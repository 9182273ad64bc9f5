//! Configuration management for the society directory.
//!
//! This module handles loading and validating configuration from environment
//! variables, with an optional `.env` file.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::time::Duration;

/// Configuration for the directory and its contact store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Supabase project URL
    pub supabase_url: String,

    /// Supabase anon key for authentication
    pub supabase_key: String,

    /// Table holding service contacts (default: "contacts")
    pub contacts_table: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// How long category listings stay cached, in seconds (default: 60)
    pub category_cache_ttl_secs: u64,

    /// Delay before leaving the form after a successful submission (default: 1500)
    pub success_redirect_delay_ms: u64,

    /// Notification lifetime in seconds (default: 4)
    pub notification_ttl_secs: u64,

    /// Log level (default: "warn")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `SUPABASE_URL`: Base URL of the Supabase project
    /// - `SUPABASE_ANON_KEY`: API key sent with every request
    ///
    /// Optional environment variables:
    /// - `CONTACTS_TABLE`: Table name (default: "contacts")
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `CATEGORY_CACHE_TTL_SECS`: Listing cache TTL (default: 60)
    /// - `SUCCESS_REDIRECT_DELAY_MS`: Delay before navigating away (default: 1500)
    /// - `NOTIFICATION_TTL_SECS`: Notification lifetime (default: 4)
    /// - `LOG_LEVEL`: Logging level (default: "warn")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let supabase_url = env::var("SUPABASE_URL")
            .map_err(|_| ConfigError::MissingVar("SUPABASE_URL".to_string()))?;

        let supabase_key = env::var("SUPABASE_ANON_KEY")
            .map_err(|_| ConfigError::MissingVar("SUPABASE_ANON_KEY".to_string()))?;

        if !supabase_url.starts_with("http://") && !supabase_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "SUPABASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if supabase_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "SUPABASE_ANON_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let contacts_table = env::var("CONTACTS_TABLE").unwrap_or_else(|_| "contacts".to_string());
        if contacts_table.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CONTACTS_TABLE".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let category_cache_ttl_secs = Self::parse_env_u64("CATEGORY_CACHE_TTL_SECS", 60)?;
        let success_redirect_delay_ms = Self::parse_env_u64("SUCCESS_REDIRECT_DELAY_MS", 1500)?;
        let notification_ttl_secs = Self::parse_env_u64("NOTIFICATION_TTL_SECS", 4)?;

        if notification_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: "NOTIFICATION_TTL_SECS".to_string(),
                reason: "Must be at least 1 second".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Config {
            supabase_url,
            supabase_key,
            contacts_table,
            request_timeout,
            category_cache_ttl_secs,
            success_redirect_delay_ms,
            notification_ttl_secs,
            log_level,
        })
    }

    pub fn success_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.success_redirect_delay_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_ttl_secs)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            supabase_url: String::new(),
            supabase_key: String::new(),
            contacts_table: "contacts".to_string(),
            request_timeout: 10,
            category_cache_ttl_secs: 60,
            success_redirect_delay_ms: 1500,
            notification_ttl_secs: 4,
            log_level: "warn".to_string(),
        }
    }
}
