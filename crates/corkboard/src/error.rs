//! Error types for Corkboard operations.
//!
//! This module provides the main error type [`CorkboardError`]. The layout
//! engines themselves never fail; errors come from reading and validating
//! board documents and from exporting the result.

use std::io;

use thiserror::Error;

/// The main error type for Corkboard operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the board source next to the TOML error so the
/// span it points at can be shown to the user.
#[derive(Debug, Error)]
pub enum CorkboardError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: toml::de::Error, src: String },

    #[error("Invalid board: {0}")]
    Board(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl CorkboardError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
