//! Configuration module for the chat relay.

use serde::Deserialize;
use std::path::Path;

use crate::{RelayError, Result};

/// Routes served next to the WebSocket endpoint.
const RESERVED_PATHS: &[&str] = &["/api/socket", "/health"];

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path of the WebSocket endpoint.
    #[serde(default = "default_ws_path")]
    pub ws_path: String,
    /// Capacity of each connection's outbound event queue.
    ///
    /// Events fanned out to a connection whose queue is full are dropped
    /// for that connection only.
    #[serde(default = "default_outbound_queue_capacity")]
    pub outbound_queue_capacity: usize,
    /// CORS allowed origins (empty = any origin).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_ws_path() -> String {
    "/api/socketio".to_string()
}

fn default_outbound_queue_capacity() -> usize {
    256
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            ws_path: default_ws_path(),
            outbound_queue_capacity: default_outbound_queue_capacity(),
            cors_origins: vec![],
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/chat-relay.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(RelayError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| RelayError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `SOCKET_PORT`: listening port
    /// - `CHAT_RELAY_LOG_LEVEL`: log level
    ///
    /// Empty or unparsable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("SOCKET_PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) if port.is_empty() => {}
                Err(_) => {
                    tracing::warn!(value = %port, "ignoring invalid SOCKET_PORT");
                }
            }
        }

        if let Ok(level) = std::env::var("CHAT_RELAY_LOG_LEVEL") {
            if !level.is_empty() {
                self.logging.level = level;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the outbound queue capacity is zero
    /// - the WebSocket path does not start with `/`
    pub fn validate(&self) -> Result<()> {
        if self.server.outbound_queue_capacity == 0 {
            return Err(RelayError::Config(
                "server.outbound_queue_capacity must be greater than zero".to_string(),
            ));
        }
        if !self.server.ws_path.starts_with('/') {
            return Err(RelayError::Config(format!(
                "server.ws_path must start with '/', got {:?}",
                self.server.ws_path
            )));
        }
        if RESERVED_PATHS.contains(&self.server.ws_path.as_str()) {
            return Err(RelayError::Config(format!(
                "server.ws_path {:?} collides with a built-in route",
                self.server.ws_path
            )));
        }
        Ok(())
    }

    /// The `host:port` string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
