//! Implementation of `lupe doc`.

use std::process::ExitCode;

use lupe_core::{
    DocId, FieldFailure, FieldReconstructor, ReconstructOptions, ReconstructedField,
    ReconstructionReport,
};
use serde::Serialize;

use super::shared::StderrProgress;
use crate::cli::{
    args::DocCommand,
    context::{CommandContext, build_exclusions},
    output::{dim, print_json, subheader, warning},
};

/// JSON output for `lupe doc`.
#[derive(Serialize)]
struct JsonDocument<'a> {
    /// Document number.
    doc: DocId,
    /// Fields in name order.
    fields: Vec<&'a ReconstructedField>,
    /// Fields that could not be rebuilt.
    failures: &'a [FieldFailure],
}

/// Shows the fields of one document.
pub fn run(ctx: &CommandContext, cmd: &DocCommand) -> ExitCode {
    let settings = &ctx.config.reconstruct;
    let excluded = match build_exclusions(&cmd.exclusion, &[], None) {
        Ok(junk) => junk,
        Err(code) => return code,
    };
    let options = ReconstructOptions {
        excluded,
        tokens_per_line: cmd.tokens_per_line.unwrap_or(settings.tokens_per_line),
        gap_marker: settings.gap_marker.clone(),
        fill_unrecorded: cmd.fill_gaps || settings.fill_unrecorded,
    };

    let source = match ctx.open_index() {
        Ok(source) => source,
        Err(code) => return code,
    };
    let reconstructor = FieldReconstructor::with_options(&source, options);

    let mut progress = StderrProgress::new("reconstructing");
    let result = if cmd.fields.is_empty() {
        reconstructor.reconstruct_all_with_progress(cmd.doc, &mut progress)
    } else {
        reconstructor.reconstruct_with_progress(cmd.doc, &cmd.fields, &mut progress)
    };
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cmd.json {
        return print_json(&JsonDocument {
            doc: cmd.doc,
            fields: report.fields.values().collect(),
            failures: &report.failures,
        });
    }
    print_report(cmd.doc, &report);
    ExitCode::SUCCESS
}

/// Prints each field as a heading followed by its indented value.
fn print_report(doc: DocId, report: &ReconstructionReport) {
    println!("{}", subheader(&format!("Document {doc}")));
    println!();

    for field in report.fields.values() {
        if field.is_approximate {
            println!("{} {}", subheader(&field.name), dim("(reconstructed)"));
        } else {
            println!("{}", subheader(&field.name));
        }
        if field.value.is_empty() {
            println!("   {}", dim("(empty)"));
        }
        for line in field.value.lines() {
            println!("   {line}");
        }
        println!();
    }

    for failure in &report.failures {
        eprintln!(
            "{}",
            warning(&format!("warning: {}: {}", failure.field, failure.reason))
        );
    }
}
