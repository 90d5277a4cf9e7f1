//! Tree errors.
//!
//! The tree algebra itself is total; the only failures are the resource
//! guard on depth and settings loading.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("tree depth {depth} exceeds the configured limit of {limit}")]
    DepthLimitExceeded { depth: usize, limit: usize },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
