//! CLI argument definitions using clap
//!
//! Every flag can also come from the environment, so the service runs
//! unchanged under a process manager:
//!
//! - `--host` / `BIND_HOST`
//! - `--port` / `PORT`
//! - `--database` / `DATABASE_PATH`
//! - `--allowed-origins` / `ALLOWED_ORIGINS` (comma separated, `*` for any)
//! - `--body-limit` / `BODY_LIMIT`
//! - `--strict-updates` / `STRICT_UPDATES`

use std::path::PathBuf;

use clap::Parser;

use crate::http_server::{AllowedOrigins, ServerConfig, DEFAULT_BODY_LIMIT};
use crate::todos::UpdatePolicy;

/// HTTP service for to-do items backed by SQLite
#[derive(Parser, Debug)]
#[command(name = "todo-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite database file (`:memory:` for a throwaway store)
    #[arg(long, env = "DATABASE_PATH", default_value = "todos.db")]
    pub database: PathBuf,

    /// Origins allowed by CORS
    #[arg(long, env = "ALLOWED_ORIGINS", default_value = "http://localhost:3000")]
    pub allowed_origins: AllowedOrigins,

    /// Maximum request body size in bytes
    #[arg(long, env = "BODY_LIMIT", default_value_t = DEFAULT_BODY_LIMIT)]
    pub body_limit: usize,

    /// Reject unrecognized update values instead of ignoring them
    #[arg(long, env = "STRICT_UPDATES")]
    pub strict_updates: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Build the server configuration
    pub fn into_config(self) -> ServerConfig {
        let update_policy = if self.strict_updates {
            UpdatePolicy::Strict
        } else {
            UpdatePolicy::Lenient
        };

        ServerConfig {
            host: self.host,
            port: self.port,
            database: self.database,
            allowed_origins: self.allowed_origins,
            body_limit: self.body_limit,
            update_policy,
        }
    }
}
