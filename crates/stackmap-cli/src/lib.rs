//! CLI logic for the stackmap diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use stackmap::{DiagramBuilder, StackmapError};

/// Run the stackmap CLI application
///
/// Reads the descriptor at `args.input`, renders it and writes the SVG to
/// `args.output`. Edges that reference unknown nodes are skipped and
/// logged; they do not fail the run.
///
/// # Errors
///
/// Returns `StackmapError` for file I/O, configuration, descriptor and
/// rendering errors.
pub fn run(args: &Args) -> Result<(), StackmapError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing descriptor"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let descriptor = builder.parse(&source)?;
    let scene = builder.render_scene(&descriptor)?;
    for diagnostic in scene.diagnostics() {
        warn!(diagnostic:% = diagnostic; "Skipped part of the descriptor");
    }
    let svg = builder.export_svg(&scene)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
