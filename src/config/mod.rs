//! Configuration loading and management

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind (e.g., "127.0.0.1", "0.0.0.0", "localhost")
    pub host: String,

    /// TCP port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Complete configuration for the registry server
///
/// Every field has a default; a file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub server: ServerConfig,

    /// `tracing_subscriber::EnvFilter` directive, used when `RUST_LOG` is unset
    pub log_filter: String,

    /// Populate the store with demo records at start-up
    pub seed_demo_data: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            log_filter: "info".to_string(),
            seed_demo_data: true,
        }
    }
}

impl RegistryConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::ReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            },
        })?;

        serde_yaml::from_str::<Self>(&content)
            .map_err(|e| ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            })?
            .validated()
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str::<Self>(yaml)
            .map_err(|e| ConfigError::ParseError {
                file: None,
                message: e.to_string(),
            })?
            .validated()
    }

    /// Address the server listens on
    ///
    /// IP literals are used as-is; hostnames resolve to their first address.
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        let host = self.server.host.as_str();
        let invalid = |message: String| ConfigError::InvalidValue {
            field: "server.host".to_string(),
            value: self.server.host.clone(),
            message,
        };

        if host.is_empty() || host.chars().any(char::is_whitespace) {
            return Err(invalid("expected an IP address or hostname".to_string()));
        }

        (host, self.server.port)
            .to_socket_addrs()
            .map_err(|e| invalid(e.to_string()))?
            .next()
            .ok_or_else(|| invalid("hostname resolved to no addresses".to_string()))
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_filter".to_string(),
                value: self.log_filter,
                message: "must not be empty".to_string(),
            });
        }
        self.bind_address()?;
        Ok(self)
    }
}
