//! Runtime configuration read from `TICKLIST_*` environment variables.
//!
//! - `TICKLIST_PORT`: port to listen on (default 3000)
//! - `TICKLIST_DATABASE`: SQLite file path (default `ticklist.db`)
//! - `TICKLIST_BASE_PATH`: prefix when served below the domain root
//! - `TICKLIST_SESSION_DAYS`: session lifetime in days (default 7)

use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE: &str = "ticklist.db";
const DEFAULT_SESSION_DAYS: i64 = 7;
const MAX_SESSION_DAYS: i64 = 3650;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub database_path: PathBuf,
    pub base_path: String,
    pub session_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("TICKLIST_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "TICKLIST_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let session_days = match lookup("TICKLIST_SESSION_DAYS") {
            Some(value) => match value.trim().parse::<i64>() {
                Ok(days) if (1..=MAX_SESSION_DAYS).contains(&days) => days,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "TICKLIST_SESSION_DAYS",
                        value,
                    })
                }
            },
            None => DEFAULT_SESSION_DAYS,
        };

        let database_path = lookup("TICKLIST_DATABASE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));

        let base_path = lookup("TICKLIST_BASE_PATH")
            .map(|path| normalize_base_path(&path))
            .unwrap_or_default();

        Ok(Config {
            port,
            database_path,
            base_path,
            session_days,
        })
    }
}

/// `"todo/"` and `"/todo"` both become `"/todo"`; `"/"` becomes empty.
pub fn normalize_base_path(path: &str) -> String {
    let path = path.trim().trim_end_matches('/');
    if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
