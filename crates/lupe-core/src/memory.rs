//! An in-memory [`IndexSource`] for fixtures and embedding.
//!
//! [`MemorySource`] tokenizes on whitespace and records one position per token, which is enough
//! to build synthetic indexes with exact control over stored values, deletions and gaps.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    ops::ControlFlow,
};

use crate::{DocId, IndexSource, SourceError};

/// Per-term postings.
#[derive(Debug, Clone, Default)]
struct TermData {
    /// Positions keyed by document.
    postings: BTreeMap<DocId, Vec<u32>>,
    /// Document frequency that overrides the postings count, for statistics-only terms.
    doc_freq: Option<u64>,
}

impl TermData {
    /// Number of documents containing the term.
    fn doc_freq(&self) -> u64 {
        self.doc_freq.unwrap_or(self.postings.len() as u64)
    }
}

/// Per-field term dictionary.
#[derive(Debug, Clone)]
struct FieldData {
    /// Terms keyed by text.
    terms: BTreeMap<String, TermData>,
    /// Whether positions are recorded for this field.
    positions: bool,
}

impl Default for FieldData {
    fn default() -> Self {
        Self {
            terms: BTreeMap::new(),
            positions: true,
        }
    }
}

/// An inverted index held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    /// Fields keyed by name.
    fields: BTreeMap<String, FieldData>,
    /// Stored values keyed by document and field.
    stored: HashMap<(DocId, String), String>,
    /// Deleted documents.
    deleted: HashSet<DocId>,
    /// Exclusive upper bound of document ordinals.
    max_doc: DocId,
    /// When set, every query fails with [`SourceError::Unavailable`].
    unavailable: bool,
}

impl MemorySource {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, indexing and storing every field value.
    ///
    /// Values are split on whitespace; each token takes the next position.
    pub fn add_document(&mut self, fields: &[(&str, &str)]) -> DocId {
        let doc = self.add_indexed_document(fields);
        for (field, value) in fields {
            self.store_value(doc, field, value);
        }
        doc
    }

    /// Adds a document, indexing every field value without storing it.
    pub fn add_indexed_document(&mut self, fields: &[(&str, &str)]) -> DocId {
        let doc = self.max_doc;
        self.max_doc += 1;
        for (field, value) in fields {
            for (pos, token) in value.split_whitespace().enumerate() {
                self.add_position(field, token, doc, pos as u32);
            }
        }
        doc
    }

    /// Records that `term` occurs at `position` in `field` of `doc`.
    ///
    /// Grows the document range to include `doc`.
    pub fn add_position(&mut self, field: &str, term: &str, doc: DocId, position: u32) {
        self.max_doc = self.max_doc.max(doc + 1);
        let positions = self
            .fields
            .entry(field.to_string())
            .or_default()
            .terms
            .entry(term.to_string())
            .or_default()
            .postings
            .entry(doc)
            .or_default();
        if let Err(idx) = positions.binary_search(&position) {
            positions.insert(idx, position);
        }
    }

    /// Sets the document frequency of a term without recording postings.
    pub fn set_doc_freq(&mut self, field: &str, term: &str, doc_freq: u64) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .terms
            .entry(term.to_string())
            .or_default()
            .doc_freq = Some(doc_freq);
    }

    /// Removes a term and its postings from a field.
    pub fn remove_term(&mut self, field: &str, term: &str) {
        if let Some(data) = self.fields.get_mut(field) {
            data.terms.remove(term);
        }
    }

    /// Stores a value for `field` of `doc`, replacing any previous value.
    pub fn store_value(&mut self, doc: DocId, field: &str, value: &str) {
        self.max_doc = self.max_doc.max(doc + 1);
        self.stored.insert((doc, field.to_string()), value.to_string());
    }

    /// Removes the stored value for `field` of `doc`.
    pub fn clear_stored_value(&mut self, doc: DocId, field: &str) {
        self.stored.remove(&(doc, field.to_string()));
    }

    /// Marks a document as deleted.
    pub fn delete_document(&mut self, doc: DocId) {
        self.deleted.insert(doc);
    }

    /// Marks `field` as indexed without positions.
    pub fn disable_positions(&mut self, field: &str) {
        self.fields.entry(field.to_string()).or_default().positions = false;
    }

    /// Makes every subsequent query fail as if the index could not be read.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Fails when the index has been marked unavailable.
    fn check_available(&self) -> Result<(), SourceError> {
        if self.unavailable {
            Err(SourceError::Unavailable("memory index marked unavailable".into()))
        } else {
            Ok(())
        }
    }
}

impl IndexSource for MemorySource {
    fn max_doc(&self) -> DocId {
        self.max_doc
    }

    fn is_live(&self, doc: DocId) -> bool {
        doc < self.max_doc && !self.deleted.contains(&doc)
    }

    fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    fn stored_field_names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self.stored.keys().map(|(_, field)| field.as_str()).collect();
        names.into_iter().map(str::to_string).collect()
    }

    fn num_terms(&self, field: &str) -> Result<u64, SourceError> {
        self.check_available()?;
        Ok(self.fields.get(field).map_or(0, |f| f.terms.len() as u64))
    }

    fn visit_terms(
        &self,
        field: &str,
        visitor: &mut dyn FnMut(&str, u64) -> ControlFlow<()>,
    ) -> Result<bool, SourceError> {
        self.check_available()?;
        let Some(data) = self.fields.get(field) else {
            return Ok(false);
        };
        for (text, term) in &data.terms {
            if visitor(text.as_str(), term.doc_freq()).is_break() {
                break;
            }
        }
        Ok(true)
    }

    fn positions(&self, field: &str, term: &str, doc: DocId) -> Result<Vec<u32>, SourceError> {
        self.check_available()?;
        let data = self
            .fields
            .get(field)
            .ok_or_else(|| SourceError::UnknownField(field.to_string()))?;
        if !data.positions {
            return Err(SourceError::PositionsUnavailable {
                field: field.to_string(),
            });
        }
        Ok(data
            .terms
            .get(term)
            .and_then(|t| t.postings.get(&doc))
            .cloned()
            .unwrap_or_default())
    }

    fn stored_value(&self, doc: DocId, field: &str) -> Result<Option<String>, SourceError> {
        self.check_available()?;
        Ok(self.stored.get(&(doc, field.to_string())).cloned())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn whitespace_tokens_get_sequential_positions() {
        let mut index = MemorySource::new();
        let doc = index.add_document(&[("body", "a b a")]);

        assert_eq!(index.positions("body", "a", doc).unwrap(), vec![0, 2]);
        assert_eq!(index.positions("body", "b", doc).unwrap(), vec![1]);
        assert!(index.positions("body", "c", doc).unwrap().is_empty());
        assert_eq!(
            index.stored_value(doc, "body").unwrap().as_deref(),
            Some("a b a")
        );
    }

    #[test]
    fn doc_freq_counts_documents_not_occurrences() {
        let mut index = MemorySource::new();
        index.add_document(&[("body", "x x x")]);
        index.add_document(&[("body", "x y")]);

        let mut seen = Vec::new();
        let found = index
            .visit_terms("body", &mut |t, df| {
                seen.push((t.to_string(), df));
                ControlFlow::Continue(())
            })
            .unwrap();
        assert!(found);
        assert_eq!(seen, vec![("x".to_string(), 2), ("y".to_string(), 1)]);
    }

    #[test]
    fn missing_field_is_reported_as_absent() {
        let index = MemorySource::new();
        let found = index
            .visit_terms("nope", &mut |_, _| ControlFlow::Continue(()))
            .unwrap();
        assert!(!found);
    }

    #[test]
    fn visitor_can_stop_early() {
        let mut index = MemorySource::new();
        index.add_document(&[("body", "a b c d")]);
        let mut count = 0;
        index
            .visit_terms("body", &mut |_, _| {
                count += 1;
                if count == 2 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn deleted_and_out_of_range_documents_are_not_live() {
        let mut index = MemorySource::new();
        let doc = index.add_document(&[("body", "a")]);
        assert!(index.is_live(doc));
        index.delete_document(doc);
        assert!(!index.is_live(doc));
        assert!(!index.is_live(5));
    }

    #[test]
    fn stored_field_names_include_unindexed_fields() {
        let mut index = MemorySource::new();
        let doc = index.add_document(&[("body", "a")]);
        index.store_value(doc, "url", "http://example.com");
        assert_eq!(index.field_names(), vec!["body".to_string()]);
        assert_eq!(
            index.stored_field_names(),
            vec!["body".to_string(), "url".to_string()]
        );
    }

    #[test]
    fn unstored_documents_have_no_stored_value() {
        let mut index = MemorySource::new();
        let doc = index.add_indexed_document(&[("body", "a")]);
        assert_eq!(index.stored_value(doc, "body").unwrap(), None);
    }

    #[test]
    fn unavailable_index_fails_queries() {
        let mut index = MemorySource::new();
        index.add_document(&[("body", "a")]);
        index.set_unavailable(true);
        assert!(matches!(
            index.stored_value(0, "body"),
            Err(SourceError::Unavailable(_))
        ));
    }
}
