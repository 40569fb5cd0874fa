use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CORS_ORIGINS, DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_PORT, MAX_MAX_CONNECTIONS, MIN_MAX_CONNECTIONS, MIN_PORT,
};
use crate::error::ensure_range;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum concurrent WebSocket connections across all tenants
    pub max_connections: usize,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
    /// Directory served under /frontend when set
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Port 0 means "auto-assign" - OS picks an available port.
        if self.port != 0 && self.port < MIN_PORT {
            return Err(ConfigError::config(format!(
                "server.port must be 0 (auto) or >= {}, got {}",
                MIN_PORT, self.port
            )));
        }

        ensure_range(
            "server.max_connections",
            self.max_connections,
            MIN_MAX_CONNECTIONS,
            MAX_MAX_CONNECTIONS,
        )?;

        if let Some(origin) = self
            .cors_origins
            .iter()
            .find(|o| !(o.starts_with("http://") || o.starts_with("https://")))
        {
            return Err(ConfigError::config(format!(
                "server.cors_origins entries must start with http:// or https://, got '{}'",
                origin
            )));
        }

        Ok(())
    }
}
