//! Best-effort reconstruction of unstored field content.
//!
//! When a field was indexed but not stored, its text can still be approximated by walking every
//! term of the field and asking where it occurs in the target document. Terms are laid out by
//! position; positions the index knows about but that no surviving term covers are replaced by a
//! gap marker such as `null_3`. The result is lossy: casing, punctuation and anything the
//! analyzer dropped are gone.

use std::{
    collections::{BTreeMap, HashSet},
    ops::ControlFlow,
};

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    AnalysisError, DocId, IndexSource, JunkWords, ProgressReporter, SilentReporter, SourceError,
    progress::ProgressTracker,
};

/// Tokens emitted per line of reconstructed text.
pub const DEFAULT_TOKENS_PER_LINE: usize = 10;

/// Prefix of the marker standing in for unresolved positions.
pub const DEFAULT_GAP_MARKER: &str = "null";

/// Separator between terms recovered at the same position.
const SAME_POSITION_SEPARATOR: &str = "|";

/// Options controlling reconstruction output.
#[derive(Debug, Clone)]
pub struct ReconstructOptions {
    /// Terms treated as unresolved even when present in the index.
    pub excluded: JunkWords,
    /// Tokens per line; zero disables line breaks.
    pub tokens_per_line: usize,
    /// Prefix of gap markers; a run of `k` unresolved positions renders as `{gap_marker}_{k}`.
    pub gap_marker: String,
    /// Treat every position between 0 and the last recorded one as part of the document, so
    /// tokens dropped at indexing time (stop words) also produce gap markers.
    pub fill_unrecorded: bool,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            excluded: JunkWords::new(),
            tokens_per_line: DEFAULT_TOKENS_PER_LINE,
            gap_marker: DEFAULT_GAP_MARKER.to_string(),
            fill_unrecorded: false,
        }
    }
}

/// The content of one field of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconstructedField {
    /// Field name.
    pub name: String,
    /// Stored or reconstructed text.
    pub value: String,
    /// True when `value` was rebuilt from postings rather than read from a stored value.
    pub is_approximate: bool,
}

/// A field that could not be reconstructed and was degraded to an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFailure {
    /// Field name.
    pub field: String,
    /// Why reconstruction failed.
    pub reason: String,
}

/// Reconstructed fields together with any per-field failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconstructionReport {
    /// Fields keyed by name.
    pub fields: BTreeMap<String, ReconstructedField>,
    /// Fields that degraded to an empty approximate value.
    pub failures: Vec<FieldFailure>,
}

/// Rebuilds document fields from an index.
pub struct FieldReconstructor<S> {
    /// Index being read.
    source: S,
    /// Output options.
    options: ReconstructOptions,
}

impl<S: IndexSource> FieldReconstructor<S> {
    /// Creates a reconstructor with default options.
    pub fn new(source: S) -> Self {
        Self::with_options(source, ReconstructOptions::default())
    }

    /// Creates a reconstructor with explicit options.
    pub fn with_options(source: S, options: ReconstructOptions) -> Self {
        Self { source, options }
    }

    /// The options in effect.
    pub fn options(&self) -> &ReconstructOptions {
        &self.options
    }

    /// Returns the content of each requested field of `doc`, keyed by field name.
    ///
    /// Stored values are returned verbatim. Unstored fields are rebuilt from positional postings
    /// and flagged approximate; a field that cannot be rebuilt comes back as an empty
    /// approximate value rather than failing the whole request.
    pub fn reconstruct(
        &self,
        doc: DocId,
        fields: &[String],
    ) -> Result<BTreeMap<String, ReconstructedField>, AnalysisError> {
        self.reconstruct_with_progress(doc, fields, &mut SilentReporter)
            .map(|report| report.fields)
    }

    /// Reconstructs every field known to the index.
    ///
    /// Covers every indexed field plus every stored field. A field that is stored but carries no
    /// indexed terms is included only when `doc` has a value for it.
    pub fn reconstruct_all(&self, doc: DocId) -> Result<ReconstructionReport, AnalysisError> {
        self.reconstruct_all_with_progress(doc, &mut SilentReporter)
    }

    /// Like [`reconstruct_all`](Self::reconstruct_all), reporting progress while term
    /// dictionaries are scanned.
    pub fn reconstruct_all_with_progress(
        &self,
        doc: DocId,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<ReconstructionReport, AnalysisError> {
        let mut fields = self.source.field_names();
        let indexed: HashSet<String> = fields.iter().cloned().collect();
        let stored_only: HashSet<String> = self
            .source
            .stored_field_names()
            .into_iter()
            .filter(|name| !indexed.contains(name))
            .collect();
        fields.extend(stored_only.iter().cloned());
        fields.sort_unstable();
        self.run(doc, &fields, &stored_only, reporter)
    }

    /// Like [`reconstruct`](Self::reconstruct), reporting progress while term dictionaries are
    /// scanned and returning per-field failures alongside the values.
    pub fn reconstruct_with_progress(
        &self,
        doc: DocId,
        fields: &[String],
        reporter: &mut dyn ProgressReporter,
    ) -> Result<ReconstructionReport, AnalysisError> {
        self.run(doc, fields, &HashSet::new(), reporter)
    }

    /// Reconstructs `fields` of `doc`. Fields in `stored_only` are never rebuilt from postings;
    /// they are left out when `doc` has no stored value for them.
    fn run(
        &self,
        doc: DocId,
        fields: &[String],
        stored_only: &HashSet<String>,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<ReconstructionReport, AnalysisError> {
        if !self.source.is_live(doc) {
            return Err(AnalysisError::DocumentNotFound {
                doc,
                max_doc: self.source.max_doc(),
            });
        }

        let mut report = ReconstructionReport::default();
        let mut unstored = Vec::new();
        let mut seen = HashSet::new();

        for field in fields {
            if !seen.insert(field.as_str()) {
                continue;
            }
            match self.source.stored_value(doc, field) {
                Ok(Some(value)) => {
                    report
                        .fields
                        .insert(field.clone(), field_value(field, value, false));
                }
                Ok(None) if stored_only.contains(field) => {}
                Ok(None) => unstored.push(field),
                Err(SourceError::Unavailable(message)) => {
                    return Err(AnalysisError::IndexUnavailable(message));
                }
                Err(err) => {
                    debug!(field = %field, error = %err, "stored value unreadable, rebuilding");
                    unstored.push(field);
                }
            }
        }

        let mut total = 0;
        for field in &unstored {
            total += self.source.num_terms(field)?;
        }
        let mut progress = ProgressTracker::new(reporter, total);

        for field in unstored {
            let value = match self.rebuild_field(doc, field, &mut progress) {
                Ok(value) => value,
                Err(SourceError::Unavailable(message)) => {
                    return Err(AnalysisError::IndexUnavailable(message));
                }
                Err(err) => {
                    warn!(field = %field, doc, error = %err, "could not reconstruct field");
                    report.failures.push(FieldFailure {
                        field: field.clone(),
                        reason: err.to_string(),
                    });
                    String::new()
                }
            };
            report
                .fields
                .insert(field.clone(), field_value(field, value, true));
        }

        progress.finish();
        Ok(report)
    }

    /// Rebuilds one field of `doc` from positional postings.
    fn rebuild_field(
        &self,
        doc: DocId,
        field: &str,
        progress: &mut ProgressTracker<'_>,
    ) -> Result<String, SourceError> {
        // Every known position of the document; an empty list marks an unresolved position.
        let mut slots: BTreeMap<u32, Vec<String>> = BTreeMap::new();
        let mut failure = None;

        let found = self.source.visit_terms(field, &mut |text, _doc_freq| {
            progress.advance(1);
            let positions = match self.source.positions(field, text, doc) {
                Ok(positions) => positions,
                Err(err) => {
                    failure = Some(err);
                    return ControlFlow::Break(());
                }
            };
            let resolved = !self.options.excluded.contains(text);
            for pos in positions {
                let slot = slots.entry(pos).or_default();
                if resolved {
                    slot.push(text.to_string());
                }
            }
            ControlFlow::Continue(())
        })?;

        if let Some(err) = failure {
            return Err(err);
        }
        if !found {
            return Err(SourceError::UnknownField(field.to_string()));
        }

        debug!(field = %field, doc, positions = slots.len(), "rebuilt field from postings");
        Ok(render_slots(slots, &self.options))
    }
}

/// Builds a field value record.
fn field_value(name: &str, value: String, is_approximate: bool) -> ReconstructedField {
    ReconstructedField {
        name: name.to_string(),
        value,
        is_approximate,
    }
}

/// Lays out recovered terms by position, coalescing unresolved runs into gap markers.
fn render_slots(slots: BTreeMap<u32, Vec<String>>, options: &ReconstructOptions) -> String {
    let mut tokens = Vec::new();
    let mut gap: u64 = 0;
    let mut next_expected: u64 = 0;

    for (pos, mut terms) in slots {
        let pos = u64::from(pos);
        if options.fill_unrecorded {
            gap += pos - next_expected;
        }
        next_expected = pos + 1;

        if terms.is_empty() {
            gap += 1;
            continue;
        }
        if gap > 0 {
            tokens.push(format!("{}_{gap}", options.gap_marker));
            gap = 0;
        }
        terms.sort_unstable();
        terms.dedup();
        tokens.push(terms.join(SAME_POSITION_SEPARATOR));
    }
    // Unresolved positions after the last resolved term; never extends past the last known one.
    if gap > 0 {
        tokens.push(format!("{}_{gap}", options.gap_marker));
    }

    join_tokens(&tokens, options.tokens_per_line)
}

/// Joins tokens with spaces, breaking the line after every `per_line` tokens.
fn join_tokens(tokens: &[String], per_line: usize) -> String {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            if per_line > 0 && i % per_line == 0 {
                out.push('\n');
            } else {
                out.push(' ');
            }
        }
        out.push_str(token);
    }
    out
}
