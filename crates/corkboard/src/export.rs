//! Export of laid-out boards.
//!
//! ```text
//! Board document
//!     ↓ parse + validate
//! Board
//!     ↓ layout
//! BoardLayout
//!     ↓ export (this module)
//! SVG text
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! Export errors convert into [`CorkboardError`] at the crate boundary.
//!
//! [`CorkboardError`]: crate::CorkboardError

pub mod svg;

use thiserror::Error;

use crate::{error::CorkboardError, layout::BoardLayout};

/// Abstraction for board export backends.
pub trait Exporter {
    /// Render a laid-out board and return the encoded document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format.
    fn export_board(&mut self, layout: &BoardLayout) -> Result<String, Error>;
}

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum Error {
    /// The style configuration could not be resolved.
    #[error("Style error: {0}")]
    Style(String),

    /// A rendering failure.
    #[error("Render error: {0}")]
    Render(String),
}

impl From<Error> for CorkboardError {
    fn from(err: Error) -> Self {
        match err {
            Error::Style(msg) => CorkboardError::Config(msg),
            Error::Render(msg) => CorkboardError::Export(msg),
        }
    }
}
