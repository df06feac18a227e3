//! Reservation site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `RESERVATIONS_HOST` - Bind address (default: 127.0.0.1)
//! - `RESERVATIONS_PORT` - Listen port (default: 3000)
//! - `RESERVATIONS_BASE_URL` - Public URL (default: `http://localhost:3000`).
//!   An `https` URL turns on secure session cookies.
//! - `RESERVATIONS_DATA_FILE` - JSON file backing the guest and booking lists.
//!   When unset, data lives in memory and is lost on restart.
//! - `RESERVATIONS_STATIC_DIR` - Stylesheets and images (default: crates/web/static)
//! - `RESERVATIONS_SLOT_INTERVAL_MINUTES` - Minutes between seatings (default: 90)
//! - `RESERVATIONS_BOOKING_WINDOW_DAYS` - How far ahead guests may book (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0 to 1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0 to 1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use reservations_core::{ScheduleConfig, ScheduleError};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Reservation site configuration.
#[derive(Debug, Clone)]
pub struct ReservationsConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the site
    pub base_url: Url,
    /// Backing file for stored lists; in-memory when `None`
    pub data_file: Option<PathBuf>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Seating times and booking window
    pub schedule: ScheduleConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_STATIC_DIR: &str = "crates/web/static";

impl ReservationsConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(&lookup);
        let defaults = ScheduleConfig::default();

        let host = env.parse_or("RESERVATIONS_HOST", "127.0.0.1")?;
        let port = env.parse_or("RESERVATIONS_PORT", "3000")?;
        let base_url = parse_base_url(&env.get_or("RESERVATIONS_BASE_URL", DEFAULT_BASE_URL))?;
        let data_file = env.optional("RESERVATIONS_DATA_FILE").map(PathBuf::from);
        let static_dir = PathBuf::from(env.get_or("RESERVATIONS_STATIC_DIR", DEFAULT_STATIC_DIR));

        let interval_minutes: u32 = env.parse_or(
            "RESERVATIONS_SLOT_INTERVAL_MINUTES",
            &defaults.interval_minutes().to_string(),
        )?;
        let booking_window_days: u32 = env.parse_or(
            "RESERVATIONS_BOOKING_WINDOW_DAYS",
            &defaults.booking_window_days().to_string(),
        )?;
        let schedule = ScheduleConfig::new(
            defaults.opening,
            defaults.last_seating,
            interval_minutes,
            booking_window_days,
        )
        .map_err(|e| match e {
            ScheduleError::ZeroInterval => ConfigError::InvalidEnvVar(
                "RESERVATIONS_SLOT_INTERVAL_MINUTES".to_string(),
                e.to_string(),
            ),
            ScheduleError::ZeroWindow => ConfigError::InvalidEnvVar(
                "RESERVATIONS_BOOKING_WINDOW_DAYS".to_string(),
                e.to_string(),
            ),
        })?;

        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env.sample_rate("SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate = env.sample_rate("SENTRY_TRACES_SAMPLE_RATE", "0.0")?;

        Ok(Self {
            host,
            port,
            base_url,
            data_file,
            static_dir,
            schedule,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with the parsing helpers used above.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn get_or(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_or(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    /// Parse a Sentry sample rate in `0.0..=1.0`.
    fn sample_rate(&self, key: &str, default: &str) -> Result<f32, ConfigError> {
        let rate: f32 = self.parse_or(key, default)?;
        if (0.0..=1.0).contains(&rate) {
            Ok(rate)
        } else {
            Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("must be between 0.0 and 1.0 (got {rate})"),
            ))
        }
    }
}

/// Parse the public base URL, accepting only http and https.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| {
        ConfigError::InvalidEnvVar("RESERVATIONS_BASE_URL".to_string(), e.to_string())
    })?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(ConfigError::InvalidEnvVar(
            "RESERVATIONS_BASE_URL".to_string(),
            "must be an http(s) URL with a host".to_string(),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ReservationsConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ReservationsConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/");
        assert!(config.data_file.is_none());
        assert_eq!(config.schedule.interval_minutes(), 90);
        assert_eq!(config.schedule.booking_window_days(), 30);
        assert!(config.sentry_dsn.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("RESERVATIONS_HOST", "0.0.0.0"),
            ("RESERVATIONS_PORT", "8080"),
            ("RESERVATIONS_BASE_URL", "https://book.example.com"),
            ("RESERVATIONS_DATA_FILE", "/var/lib/reservations/data.json"),
            ("RESERVATIONS_SLOT_INTERVAL_MINUTES", "60"),
            ("RESERVATIONS_BOOKING_WINDOW_DAYS", "14"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
            ("SENTRY_TRACES_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(config.is_secure());
        assert_eq!(
            config.data_file,
            Some(PathBuf::from("/var/lib/reservations/data.json"))
        );
        assert_eq!(config.schedule.interval_minutes(), 60);
        assert_eq!(config.schedule.booking_window_days(), 14);
        assert!(config.sentry_dsn.is_some());
        assert!((config.sentry_traces_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("RESERVATIONS_DATA_FILE", "  "), ("RESERVATIONS_PORT", "")]).unwrap();

        assert!(config.data_file.is_none());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("RESERVATIONS_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "RESERVATIONS_PORT"));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = load(&[("RESERVATIONS_SLOT_INTERVAL_MINUTES", "0")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnvVar(ref key, _) if key == "RESERVATIONS_SLOT_INTERVAL_MINUTES"
        ));
    }

    #[test]
    fn test_base_url_must_be_http() {
        assert!(load(&[("RESERVATIONS_BASE_URL", "ftp://example.com")]).is_err());
        assert!(load(&[("RESERVATIONS_BASE_URL", "not a url")]).is_err());
    }

    #[test]
    fn test_sample_rate_range() {
        assert!(load(&[("SENTRY_SAMPLE_RATE", "1.5")]).is_err());
        assert!(load(&[("SENTRY_SAMPLE_RATE", "0.5")]).is_ok());
    }
}
