//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub cors_origin: String,
    /// Simulated latency of email/password login and signup.
    pub auth_delay: Duration,
    pub social_auth_delay: Duration,
    /// Chat replies take `chat_delay_min` plus up to `chat_delay_jitter`.
    pub chat_delay_min: Duration,
    pub chat_delay_jitter: Duration,
    pub session_ttl_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: Level::INFO,
            cors_origin: "http://localhost:3000".to_string(),
            auth_delay: Duration::from_millis(1000),
            social_auth_delay: Duration::from_millis(1500),
            chat_delay_min: Duration::from_millis(1000),
            chat_delay_jitter: Duration::from_millis(1000),
            session_ttl_days: 30,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        // --- Server Settings ---
        let bind_address = parse_or(&lookup, "BIND_ADDRESS", defaults.bind_address)?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or(defaults.cors_origin);

        // --- Simulated Collaborator Latency ---
        let auth_delay = millis_or(&lookup, "AUTH_DELAY_MS", defaults.auth_delay)?;
        let social_auth_delay =
            millis_or(&lookup, "SOCIAL_AUTH_DELAY_MS", defaults.social_auth_delay)?;
        let chat_delay_min = millis_or(&lookup, "CHAT_DELAY_MIN_MS", defaults.chat_delay_min)?;
        let chat_delay_jitter =
            millis_or(&lookup, "CHAT_DELAY_JITTER_MS", defaults.chat_delay_jitter)?;

        // --- Sessions ---
        let session_ttl_days: i64 =
            parse_or(&lookup, "SESSION_TTL_DAYS", defaults.session_ttl_days)?;
        if session_ttl_days <= 0 {
            return Err(ConfigError::InvalidValue(
                "SESSION_TTL_DAYS".to_string(),
                "must be positive".to_string(),
            ));
        }

        Ok(Self {
            bind_address,
            log_level,
            cors_origin,
            auth_delay,
            social_auth_delay,
            chat_delay_min,
            chat_delay_jitter,
            session_ttl_days,
        })
    }

    /// A configuration with every simulated delay removed.
    pub fn without_delays() -> Self {
        Self {
            auth_delay: Duration::ZERO,
            social_auth_delay: Duration::ZERO,
            chat_delay_min: Duration::ZERO,
            chat_delay_jitter: Duration::ZERO,
            ..Config::default()
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

fn millis_or<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    parse_or(lookup, key, default_ms).map(Duration::from_millis)
}
