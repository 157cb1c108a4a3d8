//! Runtime configuration read from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;
use url::Url;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://recipes.db";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset and empty values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let host = parse_or(get("HOST"), "HOST", DEFAULT_HOST)?;
        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;
        let max_connections = parse_or(
            get("DATABASE_MAX_CONNECTIONS"),
            "DATABASE_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
        )?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Connection string with any password replaced, safe to log.
    pub fn redacted_database_url(&self) -> String {
        redact_password(&self.database_url)
    }
}

fn parse_or<T: std::str::FromStr>(
    value: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => match raw.trim().parse() {
            Ok(value) => Ok(value),
            Err(_) => Err(ConfigError::Invalid { key, value: raw }),
        },
    }
}

/// Strings without a password (`sqlite::memory:`, `sqlite://recipes.db`) or that do not parse are returned as is.
fn redact_password(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) if url.password().is_some() => match url.set_password(Some("***")) {
            Ok(()) => url.to_string(),
            Err(()) => raw.to_string(),
        },
        _ => raw.to_string(),
    }
}
