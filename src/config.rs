// src/config.rs
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_WORKERS: usize = 8;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;
pub const DEFAULT_MAX_VIEWS: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    BadAddress { var: &'static str, value: String },
    #[error("{var} must be a positive integer, got {value:?}")]
    BadNumber { var: &'static str, value: String },
    #[error("{var} must be true or false, got {value:?}")]
    BadFlag { var: &'static str, value: String },
    #[error("{var} is not a valid URL: {value}")]
    BadUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub workers: usize,
    /// `None` runs without a backend.
    pub api: Option<ApiConfig>,
    /// Substitute demo projects when the backend is empty or unreachable.
    pub fallback: bool,
    /// Idle time after which a viewer's matrix state is dropped.
    pub session_ttl: Duration,
    /// Upper bound on stored matrix views across all sessions.
    pub max_views: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            workers: DEFAULT_WORKERS,
            api: None,
            fallback: true,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            max_views: DEFAULT_MAX_VIEWS,
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment, tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_raw = get("SALES_MATRIX_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw.parse().map_err(|_| ConfigError::BadAddress {
            var: "SALES_MATRIX_BIND",
            value: bind_raw.clone(),
        })?;

        let workers = match get("SALES_MATRIX_WORKERS") {
            Some(raw) => positive("SALES_MATRIX_WORKERS", &raw)? as usize,
            None => DEFAULT_WORKERS,
        };

        let fallback = match get("SALES_MATRIX_FALLBACK") {
            Some(raw) => flag("SALES_MATRIX_FALLBACK", &raw)?,
            None => true,
        };

        let session_ttl = match get("SALES_MATRIX_SESSION_TTL_SECS") {
            Some(raw) => positive("SALES_MATRIX_SESSION_TTL_SECS", &raw)?,
            None => DEFAULT_SESSION_TTL_SECS,
        };

        let max_views = match get("SALES_MATRIX_MAX_VIEWS") {
            Some(raw) => positive("SALES_MATRIX_MAX_VIEWS", &raw)? as usize,
            None => DEFAULT_MAX_VIEWS,
        };

        let api = match get("SALES_API_URL") {
            Some(base_url) => {
                url::Url::parse(&base_url).map_err(|_| ConfigError::BadUrl {
                    var: "SALES_API_URL",
                    value: base_url.clone(),
                })?;
                let timeout = match get("SALES_API_TIMEOUT_SECS") {
                    Some(raw) => positive("SALES_API_TIMEOUT_SECS", &raw)?,
                    None => DEFAULT_TIMEOUT_SECS,
                };
                Some(ApiConfig {
                    base_url,
                    token: get("SALES_API_TOKEN"),
                    timeout: Duration::from_secs(timeout),
                })
            }
            None => None,
        };

        Ok(AppConfig {
            bind,
            workers,
            api,
            fallback,
            session_ttl: Duration::from_secs(session_ttl),
            max_views,
        })
    }
}

fn positive(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::BadNumber {
            var,
            value: raw.to_string(),
        }),
    }
}

fn flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::BadFlag {
            var,
            value: raw.to_string(),
        }),
    }
}
