//! Connection configuration
//!
//! Parsed from config files or built in code and passed through to the driver
//! untouched; the core only inspects the URL scheme to pick the dialect.

use serde::{Deserialize, Serialize};

/// Configuration for one database connection pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConnectionConfig {
    /// Database connection URL; the scheme selects the backend
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// How long a connection may sit idle before being closed, in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,
}

impl DatabaseConnectionConfig {
    /// Build a configuration with default pool sizing for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout: default_connect_timeout(),
            idle_timeout: default_idle_timeout(),
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout: u64) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    60
}

fn default_idle_timeout() -> u64 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_are_missing() {
        let config: DatabaseConnectionConfig =
            serde_json::from_str(r#"{"url": "postgres://localhost/app"}"#).unwrap();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout, 60);
        assert_eq!(config.idle_timeout, 600);
    }
}
