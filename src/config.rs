//! Configuration loader for the `agri-dashboard` service.
//!
//! All runtime settings and their defaults live here, loaded from environment
//! variables (the caller loads an optional `.env` file first). Nothing else in
//! the crate reads `env::var` directly.
//!
use std::env;

use anyhow::{anyhow, Result};

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse an optional boolean environment variable with a default value.
macro_rules! parse_env_bool {
    ($var_name:expr, $default:expr) => {
        match env::var($var_name).ok().as_deref() {
            None => $default,
            Some("1") | Some("true") | Some("yes") => true,
            Some("0") | Some("false") | Some("no") => false,
            Some(other) => return Err(anyhow!("Invalid {}: {}", $var_name, other)),
        }
    };
}

/// Default SQLite file, created on first connect.
pub const DEFAULT_DB_URL: &str = "sqlite://agriculture.db?mode=rwc";

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, so every request sees the same
/// snapshot for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// SQLite connection string.
    pub db_url: String,

    /// Maximum number of database connections in the pool.
    pub db_pool_max: u32,

    /// Port the HTTP server binds on all interfaces.
    pub http_port: u16,

    /// Upper bound applied to caller supplied `limit` parameters.
    pub api_max_limit: u32,

    /// Whether sample rows are written into empty tables on startup.
    pub seed_sample_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_url: DEFAULT_DB_URL.to_string(),
            db_pool_max: 5,
            http_port: 8080,
            api_max_limit: 100,
            seed_sample_data: true,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `DATABASE_URL` – SQLite connection string (default: `sqlite://agriculture.db?mode=rwc`)
/// - `DB_POOL_MAX` – max DB connections (default: 5)
/// - `HTTP_PORT` – listen port (default: 8080)
/// - `API_MAX_LIMIT` – ceiling for `limit` query parameters (default: 100)
/// - `SEED_SAMPLE_DATA` – seed empty tables on startup (default: true)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let defaults = Config::default();

    let db_url = env::var("DATABASE_URL").unwrap_or(defaults.db_url);
    let db_pool_max = parse_env_u32!("DB_POOL_MAX", defaults.db_pool_max);
    let http_port = parse_env_u32!("HTTP_PORT", u32::from(defaults.http_port));
    let http_port =
        u16::try_from(http_port).map_err(|_| anyhow!("Invalid HTTP_PORT: {}", http_port))?;
    let api_max_limit = parse_env_u32!("API_MAX_LIMIT", defaults.api_max_limit);
    let seed_sample_data = parse_env_bool!("SEED_SAMPLE_DATA", defaults.seed_sample_data);

    Ok(Config {
        db_url,
        db_pool_max,
        http_port,
        api_max_limit,
        seed_sample_data,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  DATABASE_URL     : {}", self.db_url);
        tracing::info!("  DB_POOL_MAX      : {}", self.db_pool_max);
        tracing::info!("  HTTP_PORT        : {}", self.http_port);
        tracing::info!("  API_MAX_LIMIT    : {}", self.api_max_limit);
        tracing::info!("  SEED_SAMPLE_DATA : {}", self.seed_sample_data);
    }

    /// Clamp a caller supplied row limit into `0..=api_max_limit`.
    pub fn clamp_limit(&self, requested: i64) -> i64 {
        // ---
        requested.clamp(0, i64::from(self.api_max_limit))
    }
}
