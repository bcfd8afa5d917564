//! HTTP Server Configuration
//!
//! Configuration for the HTTP server including bind address, store location,
//! CORS and body-size settings.

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::todos::UpdatePolicy;

/// Default request body ceiling in bytes
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024;

/// Origins allowed to make cross-origin requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedOrigins {
    /// Any origin
    Any,
    /// Exactly these origins
    List(Vec<String>),
}

impl FromStr for AllowedOrigins {
    type Err = Infallible;

    /// Parse a comma-separated list; `*` allows every origin.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim() == "*" {
            return Ok(AllowedOrigins::Any);
        }
        let origins = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Ok(AllowedOrigins::List(origins))
    }
}

impl fmt::Display for AllowedOrigins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllowedOrigins::Any => write!(f, "*"),
            AllowedOrigins::List(origins) => write!(f, "{}", origins.join(",")),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite database path (default: "todos.db")
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// CORS allowed origins (default: ["http://localhost:3000"])
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: AllowedOrigins,

    /// Request body ceiling in bytes (default: 10 KiB)
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,

    /// Partial-update policy (default: lenient)
    #[serde(default)]
    pub update_policy: UpdatePolicy,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_database() -> PathBuf {
    PathBuf::from("todos.db")
}

fn default_allowed_origins() -> AllowedOrigins {
    AllowedOrigins::List(vec!["http://localhost:3000".to_string()])
}

fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: default_database(),
            allowed_origins: default_allowed_origins(),
            body_limit: default_body_limit(),
            update_policy: UpdatePolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
