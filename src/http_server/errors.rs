//! Server startup errors

use std::io;

use thiserror::Error;

use crate::store::StoreError;

/// Result type for server lifecycle operations
pub type ServeResult<T> = Result<T, ServeError>;

/// Failures that stop the server from starting or keep running
#[derive(Debug, Error)]
pub enum ServeError {
    /// The store could not be opened or bootstrapped
    #[error("failed to open store: {0}")]
    Store(#[from] StoreError),

    /// Binding or serving failed
    #[error("server I/O error: {0}")]
    Io(#[from] io::Error),
}
