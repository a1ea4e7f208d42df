//! Implementation of `lupe overview`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use lupe_index::{IndexOverview, overview};
use serde::Serialize;

use crate::cli::{
    args::OverviewCommand,
    context::CommandContext,
    output::{dim, header, print_json},
};

/// JSON output for `lupe overview`.
#[derive(Serialize)]
struct JsonOverview<'a> {
    /// Index directory.
    path: String,
    /// Index statistics.
    #[serde(flatten)]
    overview: &'a IndexOverview,
}

/// Shows document counts, segments and per-field options.
pub fn run(ctx: &CommandContext, cmd: &OverviewCommand) -> ExitCode {
    let source = match ctx.open_index() {
        Ok(source) => source,
        Err(code) => return code,
    };
    let info = match overview(&source) {
        Ok(info) => info,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let path = source.path().display().to_string();

    if cmd.json {
        return print_json(&JsonOverview {
            path,
            overview: &info,
        });
    }

    println!("{}", header(&path));
    println!("   documents  {}", info.num_docs);
    println!("   max doc    {}", info.max_doc);
    println!("   segments   {}", info.num_segments);
    println!(
        "   deletions  {}",
        if info.has_deletions { "yes" } else { "no" }
    );
    println!();

    if info.fields.is_empty() {
        println!("{}", dim("(no fields)"));
        return ExitCode::SUCCESS;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Field", "Indexed", "Stored", "Positions", "Terms"]);
    for field in &info.fields {
        table.add_row(vec![
            Cell::new(&field.name),
            Cell::new(flag(field.indexed)),
            Cell::new(flag(field.stored)),
            Cell::new(flag(field.has_positions)),
            Cell::new(field.num_terms),
        ]);
    }
    println!("{table}");

    ExitCode::SUCCESS
}

/// Renders a boolean as a table mark.
fn flag(value: bool) -> &'static str {
    if value { "yes" } else { "-" }
}
