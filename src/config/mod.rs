//! Configuration types and builders.
//!
//! All connectivity values are environment-provided; nothing is hard-coded.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default ODBC driver name registered by IBM i Access Client Solutions.
pub const DEFAULT_DRIVER: &str = "IBM i Access ODBC Driver";

/// AS/400 connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// ODBC driver name as registered with the driver manager.
    pub driver: String,
    /// IBM i system address.
    pub host: String,
    /// User profile name.
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    /// Target library (schema) holding the production tables.
    pub library: String,
}

impl ConnectionConfig {
    /// Renders the ODBC connection string for this configuration.
    pub fn connection_string(&self) -> String {
        format!(
            "DRIVER={{{}}};SYSTEM={};UID={};PWD={};DBQ={};",
            self.driver, self.host, self.user, self.password, self.library
        )
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            driver: DEFAULT_DRIVER.into(),
            host: String::new(),
            user: String::new(),
            password: String::new(),
            library: String::new(),
        }
    }
}

/// Builder for [`ConnectionConfig`] with fluent API.
#[derive(Default)]
pub struct ConnectionConfigBuilder {
    config: ConnectionConfig,
}

impl ConnectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn driver(mut self, driver: impl Into<String>) -> Self {
        self.config.driver = driver.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.config.user = user.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into();
        self
    }

    pub fn library(mut self, library: impl Into<String>) -> Self {
        self.config.library = library.into();
        self
    }

    /// Reads `AS400_HOST`, `AS400_USER`, `AS400_PASSWORD`, `AS400_LIBRARY`
    /// and the optional `AS400_DRIVER` override.
    pub fn from_env(mut self) -> Result<Self> {
        if let Ok(driver) = env::var("AS400_DRIVER") {
            self.config.driver = driver;
        }
        if let Ok(host) = env::var("AS400_HOST") {
            self.config.host = host;
        }
        if let Ok(user) = env::var("AS400_USER") {
            self.config.user = user;
        }
        if let Ok(password) = env::var("AS400_PASSWORD") {
            self.config.password = password;
        }
        if let Ok(library) = env::var("AS400_LIBRARY") {
            self.config.library = library;
        }
        Ok(self)
    }

    pub fn build(self) -> Result<ConnectionConfig> {
        self.validate()?;
        Ok(self.config)
    }

    fn validate(&self) -> Result<()> {
        if self.config.host.is_empty() {
            return Err(ConfigError::MissingField("AS400_HOST".into()).into());
        }
        if self.config.user.is_empty() {
            return Err(ConfigError::MissingField("AS400_USER".into()).into());
        }
        if self.config.password.is_empty() {
            return Err(ConfigError::MissingField("AS400_PASSWORD".into()).into());
        }
        if self.config.library.is_empty() {
            return Err(ConfigError::MissingField("AS400_LIBRARY".into()).into());
        }
        Ok(())
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Destination for the one-shot `save=true` snapshot.
    pub export_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".into(),
            port: 5000,
            export_path: PathBuf::from("production-data.json"),
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `PORT` and `EXPORT_PATH`, falling back to defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(bind_addr) = env::var("BIND_ADDR") {
            config.bind_addr = bind_addr;
        }
        if let Ok(port) = env::var("PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }
        if let Ok(path) = env::var("EXPORT_PATH") {
            config.export_path = PathBuf::from(path);
        }
        config
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
