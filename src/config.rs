//! Configuration module for loading and parsing TOML configuration files.

use crate::chart::{ChartSettings, HouseSystem, Orbs};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "ASTROLOGY_CONFIG";

/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// API key configuration.
    pub auth: AuthConfig,
    /// Chart computation defaults.
    pub chart: ChartConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// API key configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret expected in the `X-API-Key` header. Chart endpoints are
    /// open when unset.
    pub api_key: Option<String>,
}

/// Chart computation defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// House system used when a request does not name one.
    pub default_house_system: HouseSystem,
    /// Aspect orbs in degrees.
    pub orbs: Orbs,
}

impl ChartConfig {
    /// Engine settings derived from this configuration.
    #[must_use]
    pub fn settings(&self) -> ChartSettings {
        ChartSettings { orbs: self.orbs }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Loads configuration from a TOML file, using defaults if the file does
    /// not exist.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Arguments
    /// * `content` - TOML content as string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `HOST`, `PORT` and `API_KEY` overrides.
    ///
    /// # Arguments
    /// * `lookup` - Variable lookup, normally `std::env::var(..).ok()`.
    ///
    /// # Errors
    /// Returns error if `PORT` is not a valid port number.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("PORT must be a valid port number, got {}", port)))?;
        }
        if let Some(api_key) = lookup("API_KEY") {
            self.auth.api_key = Some(api_key);
        }
        self.validate()
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "server host cannot be empty".to_string(),
            ));
        }

        if self.auth.api_key.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::InvalidValue(
                "api_key cannot be empty; omit it to disable authentication".to_string(),
            ));
        }

        if !self.chart.orbs.is_valid() {
            return Err(ConfigError::InvalidValue(
                "aspect orbs must be between 0 and 30 degrees".to_string(),
            ));
        }

        Ok(())
    }
}
