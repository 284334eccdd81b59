//! Error types for the opschat CLI.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, I/O, search backend, generation
//! backend, prompt rendering, and user input.

use thiserror::Error;

/// Unified error type for the opschat CLI.
///
/// All functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Search backend errors
    #[error("Search error: {0}")]
    Search(String),

    /// Generation backend errors
    #[error("Generation error: {0}")]
    Generation(String),

    /// Prompt template rendering errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Blank user submission, rejected before the pipeline starts
    #[error("Empty input: a question is required")]
    EmptyInput,

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
