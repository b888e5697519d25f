//! Error types for loading rosters, layouts and configuration

use thiserror::Error;

/// Result type used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised around the engine. Assignment itself never fails.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV roster
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON layout or roster
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML config file
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
