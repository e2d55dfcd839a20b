//! kolmsg: generate KOL partnership offer messages from templates.
//!
//! This is the main entry point for the `kolmsg` CLI. It parses arguments,
//! installs logging, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

use kolmsg::cli::Cli;
use kolmsg::{commands, exit_codes};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Err(err) = init_tracing(cli.verbose) {
        eprintln!("Warning: {}", err);
    }

    match commands::dispatch(cli.data_dir.as_deref(), cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `-v` count.
/// Logs go to stderr so stdout carries only command output.
fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let default_directive = match verbose {
        0 => "kolmsg=warn",
        1 => "kolmsg=info",
        _ => "kolmsg=debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    Ok(())
}
