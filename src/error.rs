//! Error types for the budget buddy core

use thiserror::Error;

/// Result type alias for budget buddy operations
pub type Result<T> = std::result::Result<T, BuddyError>;

#[derive(Error, Debug)]
pub enum BuddyError {

    // =============================
    // User-facing Errors
    // =============================

    /// Rejected form input. Nothing was mutated.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // =============================
    // Internal Errors
    // =============================

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuddyError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for errors the presentation layer shows inline next to a form.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
