use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use keyway_rpc::{API_VERSION_MAX, API_VERSION_MIN};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// JSON ledger fixture to serve. Without one the history is empty.
    pub fixture: Option<PathBuf>,
    /// API version for requests that do not send `api_version`.
    pub default_api_version: u32,
    pub max_request_bytes: usize,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5005)),
            fixture: None,
            default_api_version: API_VERSION_MIN,
            max_request_bytes: 1024 * 1024,
            enable_cors: false,
        }
    }
}

impl ServerConfig {
    /// Read a TOML config file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ServerResult<()> {
        if !(API_VERSION_MIN..=API_VERSION_MAX).contains(&self.default_api_version) {
            return Err(ServerError::Config(format!(
                "default_api_version {} outside {API_VERSION_MIN}..={API_VERSION_MAX}",
                self.default_api_version
            )));
        }
        if self.max_request_bytes == 0 {
            return Err(ServerError::Config("max_request_bytes must be positive".into()));
        }
        Ok(())
    }
}
