//! CLI logic for the Corkboard board renderer.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info, warn};

use corkboard::{BoardBuilder, CorkboardError};

/// Run the Corkboard CLI application
///
/// Reads the board file, lays it out and writes the resulting SVG to the
/// output file.
///
/// # Errors
///
/// Returns `CorkboardError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Board parsing and validation errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), CorkboardError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing board"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(seed) = args.seed {
        debug!(seed; "Overriding scatter seed");
        app_config = app_config.with_seed(seed);
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = BoardBuilder::new(app_config);
    let board = builder.parse(&source)?;
    if board.is_empty() {
        warn!(input_path = args.input; "Board has no content");
    }
    let svg = builder.render_svg(&board)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
