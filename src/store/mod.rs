//! # Todo Store
//!
//! Boundary to the relational store. The controller only sees the
//! [`TodoStore`] trait; each method maps to exactly one statement, so
//! atomicity is whatever the store gives a single statement.

mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

use crate::todos::model::{NewTodo, Todo, TodoChanges, TodoId};

pub use sqlite::SqliteStore;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Driver-level failure; the message is passed through to clients
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    /// An update was issued with nothing to set
    #[error("update requires at least one column to set")]
    EmptyUpdate,
}

/// Persistence primitives for todo items
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Insert a row and return the autoincrement id
    async fn insert(&self, todo: &NewTodo) -> StoreResult<TodoId>;

    /// All rows in id order
    async fn select_all(&self) -> StoreResult<Vec<Todo>>;

    /// A single row by id
    async fn select_one(&self, id: TodoId) -> StoreResult<Option<Todo>>;

    /// Write only the columns present in `changes`; returns affected rows
    async fn update(&self, id: TodoId, changes: &TodoChanges) -> StoreResult<usize>;

    /// Hard delete by id; returns affected rows
    async fn delete(&self, id: TodoId) -> StoreResult<usize>;
}
