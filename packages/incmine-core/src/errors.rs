//! Error types for incmine-core
//!
//! Provides unified error handling across the crate. Per-attempt failures
//! (compiler rejections, timeouts) are ordinary results and never show up
//! here.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::process::RunnerError;
use crate::features::search::SearchError;

/// Main error type for incmine-core operations
#[derive(Debug, Error)]
pub enum CoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Process runner error
    #[error("Process error: {0}")]
    Process(#[from] RunnerError),

    /// Search invariant violation
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Repository layout error (missing root, not a directory, ...)
    #[error("Repository error: {0}")]
    Repository(String),
}

impl CoreError {
    /// Create a repository error
    pub fn repository(msg: impl Into<String>) -> Self {
        CoreError::Repository(msg.into())
    }
}

/// Result type alias for incmine-core operations
pub type Result<T> = std::result::Result<T, CoreError>;
