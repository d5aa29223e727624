//! Ticketgate CLI entrypoint.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use ticketgate::{GateError, TicketGateConfig};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

/// Runs the gate and reports whether the CI job should pass.
fn run() -> Result<bool, GateError> {
    let config = load_config()?;
    let report = cli::gate::run(&config)?;
    Ok(!report.is_failure())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`GateError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<TicketGateConfig, GateError> {
    TicketGateConfig::load().map_err(|error| GateError::Configuration {
        message: error.to_string(),
    })
}

/// Sends diagnostics to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ignored = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
