use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(dtrsystem::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(dtrsystem::config))]
    Config(String),

    #[error("Record store error: {0}")]
    #[diagnostic(code(dtrsystem::store))]
    Store(String),

    #[error("HTTP error: {0}")]
    #[diagnostic(code(dtrsystem::http))]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    #[diagnostic(code(dtrsystem::invalid_input))]
    InvalidInput(String),

    #[error(transparent)]
    #[diagnostic(code(dtrsystem::io))]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    #[diagnostic(code(dtrsystem::other))]
    Other(String),
}

/// Type alias for Result with our Error type
pub type DtrResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create record store errors
pub fn store_error(message: &str) -> Error {
    Error::Store(message.to_string())
}

/// Helper to create invalid input errors
pub fn invalid_input(message: &str) -> Error {
    Error::InvalidInput(message.to_string())
}
