//! # HTTP Server Module
//!
//! Axum server exposing the todo resource.
//!
//! # Endpoints
//!
//! - `/todos` - list and create
//! - `/todos/:id` - fetch, partial update and delete

pub mod config;
pub mod errors;
pub mod server;

pub use config::{AllowedOrigins, ServerConfig, DEFAULT_BODY_LIMIT};
pub use errors::{ServeError, ServeResult};
pub use server::HttpServer;
