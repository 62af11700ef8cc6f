//! Corkboard - collision-avoiding layouts for corkboard-style pages.
//!
//! Labels pinned along a process track, sticky notes on a career timeline,
//! evidence rings and loose notes scattered around a hero box. Boards are
//! described in TOML, laid out by pure engines, and exported to SVG.

pub mod board;
pub mod config;
pub mod drag;
pub mod export;
pub mod layout;
pub mod rng;

mod error;

pub use corkboard_core::{color, geometry, label, sticky};

pub use error::CorkboardError;

use log::{debug, info, trace};

use board::Board;
use config::AppConfig;
use export::{Exporter, svg::SvgBuilder};
use layout::BoardLayout;

/// Builder for parsing, laying out and rendering boards.
///
/// # Examples
///
/// ```
/// use corkboard::{BoardBuilder, config::AppConfig};
///
/// let source = r#"
/// [annotations]
/// track_width = 1000.0
/// items = [
///     { text = "Inception", axis_position = 0.5 },
///     { text = "Design Sprint", axis_position = 0.5 },
/// ]
/// "#;
///
/// let builder = BoardBuilder::new(AppConfig::default());
/// let board = builder.parse(source).expect("Failed to parse");
///
/// let layout = builder.layout(&board);
/// assert_eq!(layout.annotations().unwrap().items()[1].vertical_offset, 64);
///
/// let svg = builder.render_svg(&board).expect("Failed to render");
/// assert!(svg.contains("Design Sprint"));
/// ```
#[derive(Debug, Default)]
pub struct BoardBuilder {
    config: AppConfig,
}

impl BoardBuilder {
    /// Create a new board builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse and validate a TOML board document.
    ///
    /// # Errors
    ///
    /// Returns [`CorkboardError::Parse`] for malformed TOML or unknown
    /// fields, and [`CorkboardError::Board`] when the document breaks a
    /// cross-field rule such as an out-of-range month.
    pub fn parse(&self, source: &str) -> Result<Board, CorkboardError> {
        info!("Parsing board");

        let board: Board =
            toml::from_str(source).map_err(|err| CorkboardError::new_parse_error(err, source))?;
        board.validate()?;

        debug!("Board parsed successfully");
        trace!(board:?; "Parsed board");

        Ok(board)
    }

    /// Run every layout engine the board needs.
    pub fn layout(&self, board: &Board) -> BoardLayout {
        info!("Laying out board");
        BoardLayout::calculate(board, self.config.layout())
    }

    /// Lay out a board and render it to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`CorkboardError::Config`] for unparsable style colors and
    /// [`CorkboardError::Export`] for rendering failures.
    pub fn render_svg(&self, board: &Board) -> Result<String, CorkboardError> {
        let layout = self.layout(board);

        let mut svg_exporter = SvgBuilder::new()
            .with_style(self.config.style())
            .with_seed(self.config.layout().scatter().seed)
            .build()?;

        let svg = svg_exporter.export_board(&layout)?;
        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}
