//! Clap argument definitions for the `lupe` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lupe_core::DocId;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "lupe")]
#[command(about = "Inspect the terms and documents of a tantivy index")]
pub struct Cli {
    /// Index directory (overrides [index] path in .lupe.toml)
    #[arg(long, global = true)]
    pub index: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Terms to leave out of results.
#[derive(Args, Debug, Clone, Default)]
pub struct ExclusionArgs {
    /// Ignore this term (can be specified multiple times)
    #[arg(short = 'x', long = "exclude")]
    pub exclude: Vec<String>,

    /// Also ignore the stopwords of this language (e.g. english)
    #[arg(long)]
    pub stopwords: Option<String>,
}

/// Arguments for `lupe overview`.
#[derive(Args, Debug, Clone)]
pub struct OverviewCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `lupe terms`.
#[derive(Args, Debug, Clone)]
pub struct TermsCommand {
    /// Fields to scan (default: every indexed field)
    pub fields: Vec<String>,

    /// Number of terms to show [default: 100]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    /// Term exclusion flags.
    pub exclusion: ExclusionArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `lupe doc`.
#[derive(Args, Debug, Clone)]
pub struct DocCommand {
    /// Document number
    pub doc: DocId,

    /// Fields to show (default: every field)
    pub fields: Vec<String>,

    /// Tokens per line of reconstructed text, 0 for no wrapping [default: 10]
    #[arg(long)]
    pub tokens_per_line: Option<usize>,

    /// Also mark positions no term was recorded at, such as removed stop words
    #[arg(long)]
    pub fill_gaps: bool,

    #[command(flatten)]
    /// Term exclusion flags.
    pub exclusion: ExclusionArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show document counts, segments and field options
    Overview(OverviewCommand),

    /// List the terms with the highest document frequency
    Terms(TermsCommand),

    /// Show the fields of one document, rebuilding unstored ones
    Doc(DocCommand),

    /// Show configuration files and effective settings
    Status,
}
