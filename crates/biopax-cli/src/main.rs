//! `biopax` command-line entry point.

use std::{process::ExitCode, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};
use miette::GraphicalReportHandler;

use biopax::BiopaxError;
use biopax_cli::{Args, report::reports};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");

    match biopax_cli::run(&args) {
        Ok(()) => {
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log_failure(&err);
            ExitCode::FAILURE
        }
    }
}

/// Falls back to `warn` when `level` is not a log level name.
fn init_logging(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Unknown log level `{level}`, falling back to `warn`");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
    info!(filter:?; "Logging initialised");
}

fn log_failure(err: &BiopaxError) {
    let handler = GraphicalReportHandler::new();
    for report in reports(err) {
        let mut rendered = String::new();
        handler
            .render_report(&mut rendered, &report)
            .expect("Writing to String buffer is infallible");
        error!("{rendered}");
    }
}
