// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the timeline engine.

use thiserror::Error;

/// Errors produced by the timeline engine.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// Spring interpolation configured with a non-positive stiffness or mass
    #[error("invalid spring configuration: {0}")]
    SpringConfig(String),

    /// A timeline document could not be imported
    #[error("import failed: {0}")]
    Import(String),

    /// I/O failure while reading or writing a document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for timeline operations
pub type Result<T> = std::result::Result<T, TimelineError>;
