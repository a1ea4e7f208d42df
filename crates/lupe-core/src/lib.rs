//! Term statistics and field reconstruction for inverted indexes.
//!
//! This crate holds the analysis half of lupe, independent of any particular index format:
//! - [`TopTermsCollector`] finds the terms with the highest document frequency
//! - [`FieldReconstructor`] rebuilds the text of unstored fields from positional postings
//! - [`IndexSource`] is the read-only seam both of them consume
//!
//! # Example
//!
//! ```
//! use lupe_core::{FieldReconstructor, MemorySource, TopTermsCollector};
//!
//! let mut index = MemorySource::new();
//! index.add_document(&[("body", "lucene index lucene")]);
//! let doc = index.add_indexed_document(&[("body", "lucene index")]);
//!
//! let top = TopTermsCollector::new(&index).collect(&[], 1, None).unwrap();
//! assert_eq!(top[0].text, "index");
//!
//! let fields = FieldReconstructor::new(&index)
//!     .reconstruct(doc, &["body".to_string()])
//!     .unwrap();
//! assert_eq!(fields["body"].value, "lucene index");
//! assert!(fields["body"].is_approximate);
//! ```

#![warn(missing_docs)]

mod error;
mod junk;
mod memory;
mod progress;
mod reconstruct;
mod source;
mod terms;
mod topk;

pub use error::{AnalysisError, SourceError};
pub use junk::JunkWords;
pub use memory::MemorySource;
pub use progress::{ProgressReporter, SilentReporter};
pub use reconstruct::{
    DEFAULT_GAP_MARKER, DEFAULT_TOKENS_PER_LINE, FieldFailure, FieldReconstructor,
    ReconstructOptions, ReconstructedField, ReconstructionReport,
};
pub use source::{DocId, IndexSource};
pub use terms::{DEFAULT_TOP_TERMS, TermStat, TopTermsCollector};
pub use topk::BoundedTopK;
