//! [`IndexSource`] over an on-disk tantivy index.
//!
//! Tantivy keeps one term dictionary and one set of postings per segment. [`TantivySource`]
//! presents the segments as a single index: document IDs are global ordinals in segment order,
//! and term enumeration merges the per-segment dictionaries so each term appears once with its
//! document frequency summed across segments.

use std::{
    cmp::Reverse,
    collections::BinaryHeap,
    io,
    ops::ControlFlow,
    path::{Path, PathBuf},
    str,
    sync::Arc,
};

use lupe_core::{DocId, IndexSource, SourceError};
use tantivy::{
    DocAddress, DocSet, Index, InvertedIndexReader, ReloadPolicy, Searcher, SegmentReader,
    TERMINATED, TantivyDocument, Term,
    directory::MmapDirectory,
    postings::Postings,
    schema::{Field, FieldEntry, FieldType, IndexRecordOption, OwnedValue, Schema, Value},
};
use tracing::{debug, info};

use crate::{IndexError, analyzer::register_analyzers};

/// A read-only snapshot of a tantivy index.
pub struct TantivySource {
    /// Directory the index was opened from.
    path: PathBuf,
    /// Searcher pinned to the segments that were live at open time.
    searcher: Searcher,
    /// Global ordinal of the first document of each segment.
    bases: Vec<DocId>,
    /// Exclusive upper bound of global document ordinals.
    max_doc: DocId,
}

impl TantivySource {
    /// Opens the index stored in `path`.
    pub fn open(path: &Path) -> Result<Self, IndexError> {
        if !path.exists() {
            return Err(IndexError::OpenIndex {
                path: path.to_path_buf(),
                message: "index directory does not exist".to_string(),
            });
        }

        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            IndexError::open_index(path.to_path_buf(), &err)
        })?;

        let index = Index::open(dir).map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        register_analyzers(&index);

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        let searcher = reader.searcher();

        let mut bases = Vec::with_capacity(searcher.segment_readers().len());
        let mut max_doc: DocId = 0;
        for segment in searcher.segment_readers() {
            bases.push(max_doc);
            max_doc += segment.max_doc();
        }

        info!(
            path = %path.display(),
            docs = searcher.num_docs(),
            segments = bases.len(),
            "opened index"
        );

        Ok(Self {
            path: path.to_path_buf(),
            searcher,
            bases,
            max_doc,
        })
    }

    /// Directory the index was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The index schema.
    pub fn schema(&self) -> &Schema {
        self.searcher.schema()
    }

    /// Number of live documents.
    pub fn num_docs(&self) -> u64 {
        self.searcher.num_docs()
    }

    /// Number of segments in the snapshot.
    pub fn num_segments(&self) -> usize {
        self.bases.len()
    }

    /// Returns true if any segment contains deleted documents.
    pub fn has_deletions(&self) -> bool {
        self.searcher
            .segment_readers()
            .iter()
            .any(SegmentReader::has_deletes)
    }

    /// Maps a global ordinal onto a segment ordinal and segment-local document.
    fn locate(&self, doc: DocId) -> Option<(usize, DocId)> {
        if doc >= self.max_doc {
            return None;
        }
        let segment = self.bases.partition_point(|&base| base <= doc).checked_sub(1)?;
        Some((segment, doc - self.bases[segment]))
    }

    /// Resolves `name` to an indexed text field.
    fn text_field(&self, name: &str) -> Option<(Field, &FieldEntry)> {
        let schema = self.schema();
        let field = schema.get_field(name).ok()?;
        let entry = schema.get_field_entry(field);
        (matches!(entry.field_type(), FieldType::Str(_)) && entry.is_indexed())
            .then_some((field, entry))
    }

    /// Opens the inverted index of `field` in every segment.
    fn inverted_indexes(&self, field: Field) -> Result<Vec<Arc<InvertedIndexReader>>, SourceError> {
        self.searcher
            .segment_readers()
            .iter()
            .map(|segment| segment.inverted_index(field).map_err(unavailable))
            .collect()
    }
}

/// Wraps a tantivy error as an unavailable-source error.
fn unavailable(err: tantivy::TantivyError) -> SourceError {
    SourceError::Unavailable(err.to_string())
}

/// Wraps an I/O error as an unavailable-source error.
fn unreadable(err: io::Error) -> SourceError {
    SourceError::Unavailable(err.to_string())
}

/// Renders a stored value as text, skipping values with no textual form.
fn render_value(value: &OwnedValue) -> Option<String> {
    value
        .as_str()
        .map(str::to_string)
        .or_else(|| value.as_u64().map(|v| v.to_string()))
        .or_else(|| value.as_i64().map(|v| v.to_string()))
        .or_else(|| value.as_f64().map(|v| v.to_string()))
        .or_else(|| value.as_bool().map(|v| v.to_string()))
}

impl IndexSource for TantivySource {
    fn max_doc(&self) -> DocId {
        self.max_doc
    }

    fn is_live(&self, doc: DocId) -> bool {
        let Some((segment, local)) = self.locate(doc) else {
            return false;
        };
        self.searcher.segment_readers()[segment]
            .alive_bitset()
            .is_none_or(|alive| alive.is_alive(local))
    }

    fn field_names(&self) -> Vec<String> {
        self.schema()
            .fields()
            .filter(|(_, entry)| {
                matches!(entry.field_type(), FieldType::Str(_)) && entry.is_indexed()
            })
            .map(|(_, entry)| entry.name().to_string())
            .collect()
    }

    fn stored_field_names(&self) -> Vec<String> {
        self.schema()
            .fields()
            .filter(|(_, entry)| entry.is_stored())
            .map(|(_, entry)| entry.name().to_string())
            .collect()
    }

    fn num_terms(&self, field: &str) -> Result<u64, SourceError> {
        let Some((field, _)) = self.text_field(field) else {
            return Ok(0);
        };
        Ok(self
            .inverted_indexes(field)?
            .iter()
            .map(|inverted| inverted.terms().num_terms() as u64)
            .sum())
    }

    fn visit_terms(
        &self,
        field: &str,
        visitor: &mut dyn FnMut(&str, u64) -> ControlFlow<()>,
    ) -> Result<bool, SourceError> {
        let Some((handle, _)) = self.text_field(field) else {
            return Ok(false);
        };

        let inverted = self.inverted_indexes(handle)?;
        let mut streams = inverted
            .iter()
            .map(|index| index.terms().stream())
            .collect::<io::Result<Vec<_>>>()
            .map_err(unreadable)?;

        // Min-heap of the current key of every unexhausted segment stream.
        let mut heads = BinaryHeap::new();
        for (segment, stream) in streams.iter_mut().enumerate() {
            if stream.advance() {
                heads.push(Reverse((stream.key().to_vec(), segment)));
            }
        }

        while let Some(Reverse((key, segment))) = heads.pop() {
            let mut doc_freq = u64::from(streams[segment].value().doc_freq);
            let mut consumed = vec![segment];
            while heads.peek().is_some_and(|Reverse((next, _))| *next == key) {
                if let Some(Reverse((_, other))) = heads.pop() {
                    doc_freq += u64::from(streams[other].value().doc_freq);
                    consumed.push(other);
                }
            }
            for segment in consumed {
                let stream = &mut streams[segment];
                if stream.advance() {
                    heads.push(Reverse((stream.key().to_vec(), segment)));
                }
            }

            match str::from_utf8(&key) {
                Ok(text) => {
                    if visitor(text, doc_freq).is_break() {
                        break;
                    }
                }
                Err(_) => debug!(field, "skipping non-UTF-8 term"),
            }
        }
        Ok(true)
    }

    fn positions(&self, field: &str, term: &str, doc: DocId) -> Result<Vec<u32>, SourceError> {
        let (handle, entry) = self
            .text_field(field)
            .ok_or_else(|| SourceError::UnknownField(field.to_string()))?;
        if !entry
            .field_type()
            .get_index_record_option()
            .is_some_and(|option| option.has_positions())
        {
            return Err(SourceError::PositionsUnavailable {
                field: field.to_string(),
            });
        }
        let Some((segment, local)) = self.locate(doc) else {
            return Ok(Vec::new());
        };

        let inverted = self.searcher.segment_readers()[segment]
            .inverted_index(handle)
            .map_err(unavailable)?;
        let postings = inverted
            .read_postings(
                &Term::from_field_text(handle, term),
                IndexRecordOption::WithFreqsAndPositions,
            )
            .map_err(unreadable)?;
        let Some(mut postings) = postings else {
            return Ok(Vec::new());
        };

        let mut positions = Vec::new();
        let found = postings.seek(local);
        if found == local && found != TERMINATED {
            postings.positions(&mut positions);
        }
        Ok(positions)
    }

    fn stored_value(&self, doc: DocId, field: &str) -> Result<Option<String>, SourceError> {
        let schema = self.schema();
        let Ok(handle) = schema.get_field(field) else {
            return Ok(None);
        };
        if !schema.get_field_entry(handle).is_stored() {
            return Ok(None);
        }
        let Some((segment, local)) = self.locate(doc) else {
            return Ok(None);
        };

        let address = DocAddress::new(segment as u32, local);
        let document: TantivyDocument = self.searcher.doc(address).map_err(unavailable)?;
        let values: Vec<String> = document.get_all(handle).filter_map(render_value).collect();
        if values.is_empty() {
            Ok(None)
        } else {
            Ok(Some(values.join(" ")))
        }
    }
}
