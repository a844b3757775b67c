//! Configuration for the converter service
//!
//! The only configuration surface is the HTTP bind address. Values come
//! from environment variables and fall back to the defaults the service
//! has always shipped with.

use std::env;

use anyhow::{Context, Result};

/// Environment variable overriding the bind interface
const HOST_VAR: &str = "WEATHERTEXT_HOST";
/// Environment variable overriding the listen port
const PORT_VAR: &str = "WEATHERTEXT_PORT";

/// Server configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to
    pub host: String,
    /// Port the HTTP server listens on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment, keeping defaults for
    /// anything unset
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = env::var(HOST_VAR) {
            config.host = host;
        }
        if let Ok(port) = env::var(PORT_VAR) {
            config.port = port
                .parse()
                .with_context(|| format!("Invalid {PORT_VAR} value: {port}"))?;
        }

        Ok(config)
    }

    /// Socket address string for the TCP listener
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
