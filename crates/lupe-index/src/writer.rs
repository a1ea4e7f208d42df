//! Index writer for building tantivy indexes with a declared field layout.

use std::{collections::HashMap, fs, path::Path};

use tantivy::{
    Index, IndexSettings, IndexWriter as TantivyIndexWriter, TantivyDocument, Term,
    directory::MmapDirectory, indexer::NoMergePolicy, schema::Field,
};
use tracing::debug;

use crate::{
    analyzer::register_analyzers,
    error::IndexError,
    schema::{FieldSpec, build_schema},
};

/// Default heap size for the index writer (50 MB).
const DEFAULT_HEAP_SIZE: usize = 50_000_000;

/// Writes documents to a new tantivy index.
///
/// Documents are indexed on a single thread and segments are never merged, so document
/// ordinals follow insertion order and every commit that added documents produces its own
/// segment.
pub struct IndexWriter {
    /// The Tantivy index.
    index: Index,
    /// The underlying Tantivy writer.
    writer: TantivyIndexWriter,
    /// Field handles keyed by name.
    fields: HashMap<String, Field>,
}

impl IndexWriter {
    /// Creates a new index at `path` with one text field per spec.
    ///
    /// Fails if an index already exists there.
    pub fn create(path: &Path, specs: &[FieldSpec]) -> Result<Self, IndexError> {
        let (schema, handles) = build_schema(specs);

        fs::create_dir_all(path)?;

        let dir = MmapDirectory::open(path).map_err(|e| {
            let err: tantivy::TantivyError = e.into();
            IndexError::open_index(path.to_path_buf(), &err)
        })?;

        let index = Index::create(dir, schema, IndexSettings::default())
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        register_analyzers(&index);

        let writer = index
            .writer_with_num_threads(1, DEFAULT_HEAP_SIZE)
            .map_err(|e| IndexError::open_index(path.to_path_buf(), &e))?;
        writer.set_merge_policy(Box::new(NoMergePolicy));

        let fields = specs
            .iter()
            .map(|spec| spec.name.clone())
            .zip(handles)
            .collect();

        debug!(path = %path.display(), fields = specs.len(), "created index");
        Ok(Self {
            index,
            writer,
            fields,
        })
    }

    /// Adds a document given as `(field, value)` pairs.
    ///
    /// The document is staged until [`commit`](Self::commit) is called.
    pub fn add_document(&mut self, values: &[(&str, &str)]) -> Result<(), IndexError> {
        let mut doc = TantivyDocument::new();
        for (name, value) in values {
            doc.add_text(self.field(name)?, value);
        }
        self.writer
            .add_document(doc)
            .map_err(|e| IndexError::write(&e))?;
        Ok(())
    }

    /// Deletes every document whose `field` contains the indexed term `text`.
    pub fn delete_term(&mut self, field: &str, text: &str) -> Result<(), IndexError> {
        let term = Term::from_field_text(self.field(field)?, text);
        self.writer.delete_term(term);
        Ok(())
    }

    /// Commits all pending changes to the index.
    ///
    /// This makes all added and deleted documents visible to readers.
    pub fn commit(&mut self) -> Result<(), IndexError> {
        self.writer.commit().map_err(|e| IndexError::commit(&e))?;
        Ok(())
    }

    /// Returns the number of live documents visible to a fresh reader.
    pub fn num_docs(&self) -> Result<u64, IndexError> {
        let reader = self.index.reader().map_err(|e| IndexError::read(&e))?;
        Ok(reader.searcher().num_docs())
    }

    /// Looks up a field handle by name.
    fn field(&self, name: &str) -> Result<Field, IndexError> {
        self.fields
            .get(name)
            .copied()
            .ok_or_else(|| IndexError::Write(format!("unknown field: {name}")))
    }
}
