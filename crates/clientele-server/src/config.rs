//! Server configuration.
//!
//! Values come from serialized defaults overridden by environment
//! variables prefixed with `CLIENTELE_` (for example
//! `CLIENTELE_DATABASE_URL`). The database connection string has no
//! default: the server refuses to start without it.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;

use clientele_db::DbConfig;
use figment::Figment;
use figment::providers::{Env, Serialized};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Prefix of every environment variable the server reads.
pub const ENV_PREFIX: &str = "CLIENTELE_";

/// Keys whose environment values are taken verbatim. The plain `Env`
/// provider would read `2024` as an integer and `0123` as `123`.
const TEXT_KEYS: &[&str] = &[
    "bind_addr",
    "database_url",
    "database_namespace",
    "database_name",
    "database_username",
    "database_password",
];

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address (default: `0.0.0.0:3000`).
    pub bind_addr: String,
    /// Database connection string, e.g. `ws://127.0.0.1:8000` or `mem://`.
    pub database_url: Option<String>,
    pub database_namespace: String,
    pub database_name: String,
    pub database_username: Option<String>,
    pub database_password: Option<String>,
    /// Initial connection timeout in milliseconds (default: 5000).
    pub connect_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            database_url: None,
            database_namespace: "clientele".into(),
            database_name: "main".into(),
            database_username: None,
            database_password: None,
            connect_timeout_ms: 5000,
        }
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url)
            .field("database_namespace", &self.database_namespace)
            .field("database_name", &self.database_name)
            .field("database_username", &self.database_username)
            .field(
                "database_password",
                &self.database_password.as_ref().map(|_| "***"),
            )
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .finish()
    }
}

impl ServerConfig {
    /// Load and validate configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Defaults layered under `CLIENTELE_*` environment variables.
    pub fn figment() -> Figment {
        let text: BTreeMap<String, String> = Env::prefixed(ENV_PREFIX)
            .only(TEXT_KEYS)
            .iter()
            .map(|(key, value)| (key.as_str().to_string(), value))
            .collect();

        Figment::new()
            .merge(Serialized::defaults(ServerConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX).ignore(TEXT_KEYS))
            .merge(Serialized::defaults(text))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: ServerConfig = figment
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.database_url.as_deref() {
            Some(url) if !url.trim().is_empty() => {}
            _ => return Err(ConfigError::MissingDatabaseUrl),
        }
        self.bind_addr()?;
        if self.connect_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                message: "connect_timeout_ms must be greater than zero".into(),
            });
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr.parse().map_err(|e| ConfigError::Invalid {
            message: format!("bind_addr `{}`: {e}", self.bind_addr),
        })
    }

    /// Connection settings for the database layer.
    pub fn db_config(&self) -> Result<DbConfig, ConfigError> {
        let url = self
            .database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let mut db = DbConfig::new(url);
        db.namespace = self.database_namespace.clone();
        db.database = self.database_name.clone();
        db.username = self.database_username.clone();
        db.password = self.database_password.clone();
        db.connect_timeout = Duration::from_millis(self.connect_timeout_ms);
        Ok(db)
    }
}
