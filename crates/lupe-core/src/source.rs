//! The index-reader seam consumed by the analysis components.
//!
//! [`IndexSource`] is the only way the collector and the reconstructor touch an index: enumerate
//! the terms of a field with their document frequencies, read the positions of a term inside one
//! document, and fetch a stored value. Implementations exist for
//! tantivy indexes (in `lupe-index`) and for in-memory fixtures ([`MemorySource`](crate::MemorySource)).

use std::ops::ControlFlow;

use crate::SourceError;

/// Document ordinal within an index, in `[0, max_doc)`.
pub type DocId = u32;

/// Read-only access to an inverted index.
pub trait IndexSource {
    /// Exclusive upper bound of document ordinals, counting deleted documents.
    fn max_doc(&self) -> DocId;

    /// Returns true if `doc` is in range and has not been deleted.
    fn is_live(&self, doc: DocId) -> bool;

    /// Names of all fields that carry indexed terms, in a stable order.
    fn field_names(&self) -> Vec<String>;

    /// Names of all fields whose values may be kept in the document store, in a stable order.
    ///
    /// May include fields that carry no indexed terms.
    fn stored_field_names(&self) -> Vec<String>;

    /// Number of distinct terms recorded for `field`.
    ///
    /// Only used to scale progress reports, so implementations may over-count. Unknown fields
    /// report zero.
    fn num_terms(&self, field: &str) -> Result<u64, SourceError>;

    /// Streams every distinct term of `field` together with its document frequency.
    ///
    /// Each call starts a fresh enumeration; the order of terms is unspecified. The visitor may
    /// stop the enumeration early by returning [`ControlFlow::Break`]. Returns `Ok(false)`
    /// without calling `visitor` when the field is absent from the index.
    fn visit_terms(
        &self,
        field: &str,
        visitor: &mut dyn FnMut(&str, u64) -> ControlFlow<()>,
    ) -> Result<bool, SourceError>;

    /// Positions at which `term` occurs in `field` of document `doc`, ascending.
    ///
    /// Returns an empty vector when the term does not occur in that document.
    fn positions(&self, field: &str, term: &str, doc: DocId) -> Result<Vec<u32>, SourceError>;

    /// The stored value of `field` for document `doc`.
    ///
    /// `None` means the field is not stored for this document, which is distinct from a stored
    /// empty string.
    fn stored_value(&self, doc: DocId, field: &str) -> Result<Option<String>, SourceError>;
}

impl<S: IndexSource + ?Sized> IndexSource for &S {
    fn max_doc(&self) -> DocId {
        (**self).max_doc()
    }

    fn is_live(&self, doc: DocId) -> bool {
        (**self).is_live(doc)
    }

    fn field_names(&self) -> Vec<String> {
        (**self).field_names()
    }

    fn stored_field_names(&self) -> Vec<String> {
        (**self).stored_field_names()
    }

    fn num_terms(&self, field: &str) -> Result<u64, SourceError> {
        (**self).num_terms(field)
    }

    fn visit_terms(
        &self,
        field: &str,
        visitor: &mut dyn FnMut(&str, u64) -> ControlFlow<()>,
    ) -> Result<bool, SourceError> {
        (**self).visit_terms(field, visitor)
    }

    fn positions(&self, field: &str, term: &str, doc: DocId) -> Result<Vec<u32>, SourceError> {
        (**self).positions(field, term, doc)
    }

    fn stored_value(&self, doc: DocId, field: &str) -> Result<Option<String>, SourceError> {
        (**self).stored_value(doc, field)
    }
}
