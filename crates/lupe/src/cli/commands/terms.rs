//! Implementation of `lupe terms`.

use std::process::ExitCode;

use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL_CONDENSED};
use lupe_core::{TermStat, TopTermsCollector};

use super::shared::StderrProgress;
use crate::cli::{
    args::TermsCommand,
    context::{CommandContext, build_exclusions},
    output::{dim, print_json},
};

/// Lists the terms with the highest document frequency.
pub fn run(ctx: &CommandContext, cmd: &TermsCommand) -> ExitCode {
    let settings = &ctx.config.terms;
    let limit = cmd.limit.unwrap_or(settings.limit);
    let fields = if cmd.fields.is_empty() {
        settings.fields.clone()
    } else {
        cmd.fields.clone()
    };
    let excluded = match build_exclusions(
        &cmd.exclusion,
        &settings.exclude,
        settings.stopwords.as_deref(),
    ) {
        Ok(junk) => junk,
        Err(code) => return code,
    };

    let source = match ctx.open_index() {
        Ok(source) => source,
        Err(code) => return code,
    };

    let mut progress = StderrProgress::new("scanning terms");
    let collector = TopTermsCollector::new(&source);
    let top = match collector.collect_with_progress(
        &fields,
        limit,
        (!excluded.is_empty()).then_some(&excluded),
        &mut progress,
    ) {
        Ok(top) => top,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cmd.json {
        return print_json(&top);
    }
    print_table(&top);
    ExitCode::SUCCESS
}

/// Prints ranked terms as a table.
fn print_table(top: &[TermStat]) {
    if top.is_empty() {
        println!("{}", dim("No terms found."));
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Docs", "Field", "Term"]);
    for (rank, stat) in top.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1).set_alignment(CellAlignment::Right),
            Cell::new(stat.doc_freq).set_alignment(CellAlignment::Right),
            Cell::new(&stat.field),
            Cell::new(&stat.text),
        ]);
    }
    println!("{table}");
}
