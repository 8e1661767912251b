//! # Error Types
//!
//! This module defines error types used throughout the linea library.
//!
//! Token encoding has no error type on purpose: every token has a defined
//! byte output. Errors only come from queue misuse and the layers around it.

use thiserror::Error;

/// Main error type for linea operations
#[derive(Debug, Error)]
pub enum LineaError {
    /// `peek` on a queue that holds no frames
    #[error("Queue is empty")]
    EmptyQueue,

    /// Sub-packaging requested with a chunk length that cannot split anything
    #[error("Invalid chunk length: {0} (must be greater than zero)")]
    InvalidChunkLength(usize),

    /// Malformed hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Transport-level errors (connection, TTY setup, writes)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Unknown profile or unusable link settings
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
