//! Trellis CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};

use trellis_cli::{
    Args,
    error_adapter::{Reportable, diagnostics_to_reportables, to_reportable},
};

fn render(reporter: &miette::GraphicalReportHandler, reportable: &Reportable<'_>) -> String {
    let mut writer = String::new();
    reporter
        .render_report(&mut writer, reportable)
        .expect("Writing to String buffer is infallible");
    writer
}

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Trellis");
    debug!(args:?; "Parsed arguments");

    let reporter = miette::GraphicalReportHandler::new();
    match trellis_cli::run(&args) {
        Ok(diagnostics) => {
            for reportable in diagnostics_to_reportables(&diagnostics) {
                warn!("{}", render(&reporter, &reportable));
            }
        }
        Err(err) => {
            error!("{}", render(&reporter, &to_reportable(&err)));
            process::exit(1);
        }
    }

    info!("Completed successfully");
}
