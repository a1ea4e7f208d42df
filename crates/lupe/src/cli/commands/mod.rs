//! Command implementations and dispatch.

pub mod doc;
pub mod overview;
mod shared;
pub mod status;
pub mod terms;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Overview(cmd) => overview::run(ctx, &cmd),
        Commands::Terms(cmd) => terms::run(ctx, &cmd),
        Commands::Doc(cmd) => doc::run(ctx, &cmd),
        Commands::Status => status::run(ctx),
    }
}
