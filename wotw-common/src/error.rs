//! Common error types for Weed of the Week

use thiserror::Error;

/// Common result type for Weed of the Week operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the schema, config and seeding layers
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid seed data or other input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
