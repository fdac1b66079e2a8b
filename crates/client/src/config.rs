//! # Client Configuration Module
//!
//! Loads the StudyConnect client configuration from environment variables,
//! with defaults where a value is optional.
//!
//! ## Environment Variables
//!
//! - `DATABASE_URL`: Postgres document store (unset: in-memory store)
//! - `SEED_FILE`: JSON seed for the in-memory store
//! - `STORAGE_DIR`: blob storage root (default: "./storage")
//! - `GEOCODER_URL`: Nominatim-style geocoder base URL (unset: geocoding disabled)
//! - `CURRENT_USER_ID`: signed-in user, excluded from map pins
//! - `TIMEZONE`: IANA zone used for "today" (default: "UTC")
//! - `LOG_LEVEL`: logging level (default: "info")
//! - `REQUEST_TIMEOUT_SECONDS`: geocoder HTTP timeout (default: 30)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;
use eyre::{Result, WrapErr, eyre};
use tracing::Level;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub database_url: Option<String>,
    pub seed_file: Option<PathBuf>,
    pub storage_dir: PathBuf,
    pub geocoder_url: Option<String>,
    pub current_user_id: Option<String>,
    pub timezone: Tz,
    pub log_level: Level,
    /// Geocoder request timeout in seconds
    pub request_timeout: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            seed_file: None,
            storage_dir: PathBuf::from("./storage"),
            geocoder_url: None,
            current_user_id: None,
            timezone: Tz::UTC,
            log_level: Level::INFO,
            request_timeout: 30,
        }
    }
}

/// Unknown names fall back to `INFO`.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

pub fn parse_timezone(value: &str) -> Result<Tz> {
    value
        .trim()
        .parse::<Tz>()
        .map_err(|e| eyre!("Invalid TIMEZONE value {:?}: {}", value, e))
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl ClientConfig {
    /// Loads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `TIMEZONE` is not a known IANA zone or
    /// `REQUEST_TIMEOUT_SECONDS` is not a number.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let timezone = match non_empty_var("TIMEZONE") {
            Some(name) => parse_timezone(&name)?,
            None => defaults.timezone,
        };

        let request_timeout = match non_empty_var("REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse()
                .wrap_err("Invalid REQUEST_TIMEOUT_SECONDS value")?,
            None => defaults.request_timeout,
        };

        Ok(Self {
            database_url: non_empty_var("DATABASE_URL"),
            seed_file: non_empty_var("SEED_FILE").map(PathBuf::from),
            storage_dir: non_empty_var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            geocoder_url: non_empty_var("GEOCODER_URL"),
            current_user_id: non_empty_var("CURRENT_USER_ID"),
            timezone,
            log_level: non_empty_var("LOG_LEVEL")
                .map(|level| parse_log_level(&level))
                .unwrap_or(defaults.log_level),
            request_timeout,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}
