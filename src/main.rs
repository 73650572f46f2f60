//! shipshape-badges - refresh README coverage badges

mod cli;

use clap::Parser;
use shipshape_badges::error::{BadgeError, FAILURE_EXIT_CODE};
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_failure(&err),
    }
}

/// Surface captured tool output verbatim, then the diagnostic, and pick the exit code
fn report_failure(err: &anyhow::Error) -> ExitCode {
    let badge_error = err.downcast_ref::<BadgeError>();

    let mut stderr = std::io::stderr().lock();
    if let Some((stdout, captured_stderr)) = badge_error.and_then(BadgeError::captured_output) {
        let _ = stderr.write_all(stdout.as_bytes());
        let _ = stderr.write_all(captured_stderr.as_bytes());
    }
    let _ = writeln!(stderr, "error: {}", err);

    ExitCode::from(badge_error.map_or(FAILURE_EXIT_CODE, BadgeError::exit_code))
}
