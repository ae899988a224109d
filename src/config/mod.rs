//! Configuration module for the portfolio backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::AppError;

/// Connection details for a PostgREST-compatible remote store.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Anonymous or service API key
    pub api_key: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key gating the admin routes
    pub admin_key: Option<String>,
    /// Directory holding the local fallback store
    pub data_dir: PathBuf,
    /// Path to the SQLite remote store, used when no REST remote is configured
    pub db_path: PathBuf,
    /// REST remote store, if configured
    pub remote: Option<RemoteConfig>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let admin_key = env::var("PORTFOLIO_ADMIN_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let data_dir = env::var("PORTFOLIO_DATA_DIR")
            .unwrap_or_else(|_| "./data/local".to_string())
            .into();

        let db_path = env::var("PORTFOLIO_DB_PATH")
            .unwrap_or_else(|_| "./data/remote.sqlite".to_string())
            .into();

        let remote = match (
            env::var("PORTFOLIO_REMOTE_URL"),
            env::var("PORTFOLIO_REMOTE_KEY"),
        ) {
            (Ok(url), Ok(api_key)) if !url.is_empty() => Some(RemoteConfig {
                url: url.trim_end_matches('/').to_string(),
                api_key,
            }),
            _ => None,
        };

        let bind_addr = env::var("PORTFOLIO_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid PORTFOLIO_BIND_ADDR: {}", e)))?;

        let log_level = env::var("PORTFOLIO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            admin_key,
            data_dir,
            db_path,
            remote,
            bind_addr,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 7] = [
        "PORTFOLIO_ADMIN_KEY",
        "PORTFOLIO_DATA_DIR",
        "PORTFOLIO_DB_PATH",
        "PORTFOLIO_REMOTE_URL",
        "PORTFOLIO_REMOTE_KEY",
        "PORTFOLIO_BIND_ADDR",
        "PORTFOLIO_LOG_LEVEL",
    ];

    // Env vars are process-global, so everything touching them lives in one test.
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }

        let config = Config::from_env().unwrap();
        assert!(config.admin_key.is_none());
        assert!(config.remote.is_none());
        assert_eq!(config.data_dir, PathBuf::from("./data/local"));
        assert_eq!(config.db_path, PathBuf::from("./data/remote.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");

        env::set_var("PORTFOLIO_REMOTE_URL", "https://example.supabase.co/");
        env::set_var("PORTFOLIO_REMOTE_KEY", "anon");
        let config = Config::from_env().unwrap();
        let remote = config.remote.unwrap();
        assert_eq!(remote.url, "https://example.supabase.co");
        assert_eq!(remote.api_key, "anon");

        env::set_var("PORTFOLIO_BIND_ADDR", "not an address");
        assert!(Config::from_env().is_err());

        for var in VARS {
            env::remove_var(var);
        }
    }
}
