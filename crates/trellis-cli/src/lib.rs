//! CLI logic for the Trellis converter.
//!
//! This module contains the core CLI logic: loading configuration, reading the
//! source document, converting it and writing the target document.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::{info, warn};

use trellis::{
    Converter, Diagnostic, TrellisError,
    config::{AppConfig, OutputConfig},
    format,
};

/// Run the Trellis CLI application
///
/// This function converts the input file and writes the target document to the
/// output file. Diagnostics of a successful conversion are returned so the
/// caller can report them.
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Unsupported or malformed input
/// - Structurally broken source documents
pub fn run(args: &Args) -> Result<Vec<Diagnostic>, TrellisError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Converting document"
    );

    let app_config = apply_overrides(config::load_config(args.config.as_ref())?, args);

    let source = format::load_source(&args.input)?;
    let conversion = Converter::new(app_config.convert().clone()).convert(&source)?;

    format::save_target(
        &conversion.document,
        &args.output,
        app_config.output().pretty(),
    )?;

    if !conversion.diagnostics.is_empty() {
        warn!(count = conversion.diagnostics.len(); "Some content was not converted");
    }
    info!(output_file = args.output; "Target document written");

    Ok(conversion.diagnostics)
}

/// Applies command-line flags on top of the loaded configuration.
fn apply_overrides(config: AppConfig, args: &Args) -> AppConfig {
    let mut convert = config.convert().clone();
    if args.include_hidden_layers {
        convert = convert.with_include_hidden_layers(true);
    }
    let output = if args.compact {
        OutputConfig::new(false)
    } else {
        config.output().clone()
    };
    AppConfig::new(convert, output)
}
