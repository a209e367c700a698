//! Error types for the REFLEX runtime
//!
//! The reactive navigation core itself never fails; these errors cover the
//! runtime around it: configuration loading, topic registration and
//! scheduler setup.

use thiserror::Error;

/// Result alias used throughout the REFLEX crates
pub type ReflexResult<T> = Result<T, ReflexError>;

/// Errors raised by the REFLEX runtime
#[derive(Debug, Error)]
pub enum ReflexError {
    /// Underlying I/O failure (config files, signal handler setup)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Topic registration or delivery problem
    #[error("Communication error: {0}")]
    Communication(String),

    /// Caller supplied an argument outside the accepted domain
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReflexError {
    /// Shorthand for building a [`ReflexError::Config`]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ReflexError::Config(msg.into())
    }

    /// Shorthand for building a [`ReflexError::Communication`]
    pub fn communication<S: Into<String>>(msg: S) -> Self {
        ReflexError::Communication(msg.into())
    }
}
