//! Service configuration.
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `config/default.toml`, then an optional file named by `LISTINGS_CONFIG`,
//! then `LISTINGS__`-prefixed environment variables
//! (e.g. `LISTINGS__SERVER__PORT=8080`).

use serde::Deserialize;
use std::net::SocketAddr;
use thiserror::Error;

pub const ENV_PREFIX: &str = "LISTINGS";
pub const CONFIG_PATH_VAR: &str = "LISTINGS_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid listen address {0}")]
    Address(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on astra worker threads.
    pub max_workers: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Only read when `backend = "sqlite"`.
    pub sqlite_path: String,
    /// Insert the bundled demo listings when the store starts empty.
    pub seed_sample_data: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` overrides it.
    pub level: String,
    pub format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_workers: 8,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            sqlite_path: "listings.sqlite3".to_string(),
            seed_sample_data: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::Address(raw))
    }
}

impl AppConfig {
    /// Loads defaults, config files and environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let extra_file = std::env::var(CONFIG_PATH_VAR).ok();
        Self::load_from(extra_file.as_deref())
    }

    pub fn load_from(extra_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
