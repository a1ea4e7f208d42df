//! Entry point for the `lupe` binary.

use std::{io, process::ExitCode};

use clap::Parser;
use lupe::cli::{CommandContext, args::Cli, commands};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "LUPE_LOG";

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let ctx = match CommandContext::load(cli.index.clone()) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    commands::run(cli.command, &ctx)
}

/// Sends log events to stderr, filtered by `LUPE_LOG` (default `warn`).
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
