//! Common error types for QBuzz

use thiserror::Error;

/// Common result type for QBuzz operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across QBuzz components
#[derive(Error, Debug)]
pub enum Error {
    /// IO operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
