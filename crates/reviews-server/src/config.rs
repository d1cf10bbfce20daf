//! Server configuration
//!
//! Read from environment variables; a `.env` file is loaded first if present.

use std::time::Duration;
use thiserror::Error;

const DEFAULT_NATS_SERVERS: &str = "nats://localhost:4222";
const DEFAULT_QUEUE_GROUP: &str = "reviews";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string; the in-memory store is used when unset
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// Comma-separated NATS server URLs
    pub nats_servers: String,
    pub nats_queue_group: String,
    /// Timeout for outbound requests such as `get_one_product`
    pub nats_request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url: var("DATABASE_URL"),
            database_max_connections: parse(
                "DATABASE_MAX_CONNECTIONS",
                var("DATABASE_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
            nats_servers: var("NATS_SERVERS").unwrap_or_else(|| DEFAULT_NATS_SERVERS.to_string()),
            nats_queue_group: var("NATS_QUEUE_GROUP")
                .unwrap_or_else(|| DEFAULT_QUEUE_GROUP.to_string()),
            nats_request_timeout: Duration::from_secs(parse(
                "NATS_REQUEST_TIMEOUT_SECS",
                var("NATS_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
        })
    }
}

fn parse<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
