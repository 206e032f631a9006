//! # Error Types
//!
//! Custom error types for Serial Scope using `thiserror`.
//!
//! Malformed telemetry lines are NOT represented here: they are expected
//! noise, modeled as [`crate::record::types::Rejection`] and handled
//! entirely inside the frame updater. This enum covers the failures that
//! end a session or prevent one from starting.

use thiserror::Error;

/// Main error type for Serial Scope
#[derive(Debug, Error)]
pub enum ScopeError {
    /// Serial port errors (open failures, device-level faults)
    #[error("serial port error: {0}")]
    Serial(String),

    /// Transport reached end of stream or was interrupted mid-session
    #[error("transport closed: {0}")]
    TransportClosed(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Record log encoding errors
    #[error("record encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Serial Scope
pub type Result<T> = std::result::Result<T, ScopeError>;
