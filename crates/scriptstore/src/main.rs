mod cli;

use std::process::ExitCode;

use clap::Parser;
use log::debug;
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

use cli::CliArgs;
use scriptstore_core::kernel::constants::{APP_NAME, APP_VERSION};

/// Routes `log` records from the core crate through a stderr subscriber.
/// `RUST_LOG` overrides the level picked by `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = LogTracer::init() {
        eprintln!("Warning: could not bridge log records: {}", e);
    }
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: could not install log subscriber: {}", e);
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);
    debug!("{} v{} starting", APP_NAME, APP_VERSION);

    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
