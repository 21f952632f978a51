use std::net::{AddrParseError, SocketAddr};

pub const DEFAULT_DATABASE_URL: &str = "app.db";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5555";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// SQLite database path
    pub database_url: String,
    pub listen_addr: SocketAddr,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid LISTEN_ADDR {value:?}: {source}")]
    InvalidListenAddr {
        value: String,
        source: AddrParseError,
    },
}

impl Config {
    /// Reads `DATABASE_URL` and `LISTEN_ADDR`. Call `dotenvy::dotenv` first
    /// to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidListenAddr {
                value: listen_addr.clone(),
                source,
            })?;

        Ok(Self {
            database_url,
            listen_addr,
        })
    }
}
