use std::env;
use std::path::{Path, PathBuf};

use crate::error::{PoolError, Result};
use crate::services::PayoutTable;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/pigeon_pool.db";
pub const DEFAULT_API_PORT: u16 = 8000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Name of the active environment (APP_ENV / ENV), e.g. "development"
    pub app_env: String,
    pub database_url: String,
    pub api_port: u16,
    /// LOGGING_LEVEL: one of debug, info, warn, error
    pub log_level: String,
    /// PP_PAYOUTS: comma-separated prize amounts for places 1..N
    pub payouts: PayoutTable,
}

impl Settings {
    /// Load the dotenv chain from the working directory, then read settings.
    pub fn from_env() -> Result<Self> {
        let app_env = current_app_env();
        load_env_chain(Path::new("."), &app_env);
        Self::from_vars(app_env)
    }

    fn from_vars(app_env: String) -> Result<Self> {
        let api_port = match env::var("API_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| PoolError::Config(format!("API_PORT must be a port number, got '{}'", raw)))?,
            Err(_) => DEFAULT_API_PORT,
        };

        let payouts = match env::var("PP_PAYOUTS") {
            Ok(raw) if !raw.trim().is_empty() => parse_payouts(&raw)?,
            _ => PayoutTable::default(),
        };

        Ok(Self {
            app_env,
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            api_port,
            log_level: normalize_log_level(&env::var("LOGGING_LEVEL").unwrap_or_default()),
            payouts,
        })
    }
}

fn current_app_env() -> String {
    env::var("APP_ENV")
        .or_else(|_| env::var("ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Files in the chain, lowest precedence first.
pub fn env_files(root: &Path, app_env: &str) -> Vec<PathBuf> {
    vec![
        root.join(".env"),
        root.join(format!(".env.{}", app_env)),
        root.join(format!(".env.{}.local", app_env)),
    ]
}

/// dotenv never overwrites a variable that is already set, so the chain is
/// loaded highest precedence first. Variables from the real environment win.
pub fn load_env_chain(root: &Path, app_env: &str) {
    for file in env_files(root, app_env).iter().rev() {
        if file.exists() {
            match dotenv::from_path(file) {
                Ok(()) => tracing::debug!("Loaded env file {}", file.display()),
                Err(e) => tracing::warn!("Failed to load env file {}: {}", file.display(), e),
            }
        }
    }
}

pub fn parse_payouts(raw: &str) -> Result<PayoutTable> {
    let mut amounts = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let amount = part
            .parse::<f64>()
            .map_err(|_| PoolError::Config(format!("PP_PAYOUTS entry '{}' is not a number", part)))?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(PoolError::Config(format!("PP_PAYOUTS entry '{}' must be non-negative", part)));
        }
        amounts.push(amount);
    }
    Ok(PayoutTable::new(amounts))
}

fn normalize_log_level(raw: &str) -> String {
    match raw.trim().to_lowercase().as_str() {
        "debug" => "debug".to_string(),
        "warn" | "warning" => "warn".to_string(),
        "error" => "error".to_string(),
        _ => DEFAULT_LOG_LEVEL.to_string(),
    }
}
