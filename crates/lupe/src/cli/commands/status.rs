//! Implementation of `lupe status`.

use std::process::ExitCode;

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, the resolved index and effective settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    println!("{}", subheader("Config files:"));
    if config.config_files.is_empty() {
        println!("   {}", dim("(none found)"));
    }
    for path in &config.config_files {
        let display = path.strip_prefix(&ctx.cwd).unwrap_or(path.as_path());
        println!("   {}", display.display());
    }
    println!();

    println!("{}", subheader("Index:"));
    match ctx.index_path() {
        Some(path) if path.exists() => println!("   {}", path.display()),
        Some(path) => println!("   {} {}", path.display(), warning("[missing]")),
        None => println!("   {}", dim("(not configured)")),
    }
    println!();

    println!("{}", subheader("Settings:"));
    print!("{}", config.settings_to_toml());

    ExitCode::SUCCESS
}
