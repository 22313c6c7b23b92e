//! # Error Types
//!
//! Custom error types for CUSP Xymon using `thiserror`.

use thiserror::Error;

/// Main error type for CUSP Xymon
#[derive(Debug, Error)]
pub enum CuspXymonError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Structurally malformed report document
    #[error("Report decode error: {0}")]
    Decode(String),

    /// A single report field could not be parsed
    #[error("Invalid {field} value: {value:?}")]
    FieldParse {
        /// Name of the offending report element
        field: &'static str,
        /// Raw text as received
        value: String,
    },

    /// Invalid file matching pattern
    #[error("Pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Xymon server could not be resolved or the datagram was not sent
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type alias for CUSP Xymon
pub type Result<T> = std::result::Result<T, CuspXymonError>;
