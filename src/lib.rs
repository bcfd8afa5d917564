//! todo-service - A small HTTP resource service for to-do items
//!
//! Raw path and body input is validated and coerced before it reaches the
//! store, and partial updates write only the fields a request resolves.

pub mod cli;
pub mod http_server;
pub mod store;
pub mod todos;
