//! Command-line argument definitions for the Trellis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, conversion overrides and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Trellis converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input source document
    #[arg(help = "Path to the input file (JSON source document)")]
    pub input: String,

    /// Path to the output target document
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Convert the content of hidden layers too
    #[arg(long)]
    pub include_hidden_layers: bool,

    /// Write the output on a single line
    #[arg(long)]
    pub compact: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
