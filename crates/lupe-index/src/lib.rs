//! Tantivy index access for lupe.
//!
//! This crate connects the analysis engine in `lupe-core` to on-disk tantivy indexes:
//! - [`TantivySource`] implements [`lupe_core::IndexSource`] over every segment of an index
//! - [`overview`] summarizes document counts, segments and per-field indexing options
//! - [`IndexWriter`] builds indexes with a declared [`FieldSpec`] layout
//!
//! # Example
//!
//! ```no_run
//! use lupe_core::TopTermsCollector;
//! use lupe_index::TantivySource;
//!
//! let source = TantivySource::open("./index".as_ref()).unwrap();
//! let top = TopTermsCollector::new(&source).collect(&[], 10, None).unwrap();
//! for stat in top {
//!     println!("{} {}:{}", stat.doc_freq, stat.field, stat.text);
//! }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod error;
mod overview;
mod schema;
mod source;
mod writer;

pub use analyzer::{LUPE_STOPWORD_TOKENIZER, LUPE_TOKENIZER};
pub use error::IndexError;
pub use overview::{FieldOverview, IndexOverview, overview};
pub use schema::FieldSpec;
pub use source::TantivySource;
pub use writer::IndexWriter;
