//! lupe: an inverted-index inspector.
//!
//! lupe opens a tantivy index and reports what is actually in it: document and segment counts,
//! per-field indexing options, the terms with the highest document frequency, and the content
//! of individual documents. Fields that were indexed but not stored are rebuilt from their
//! positional postings.

#![warn(missing_docs)]

pub mod cli;
