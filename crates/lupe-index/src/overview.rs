//! Whole-index statistics.

use std::ops::ControlFlow;

use lupe_core::IndexSource;
use serde::Serialize;
use tantivy::schema::FieldType;

use crate::{IndexError, TantivySource};

/// Indexing options and vocabulary size of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOverview {
    /// Field name.
    pub name: String,
    /// Whether terms of the field are searchable.
    pub indexed: bool,
    /// Whether the original value is kept in the document store.
    pub stored: bool,
    /// Whether term positions are recorded.
    pub has_positions: bool,
    /// Number of distinct terms across all segments.
    pub num_terms: u64,
}

/// Summary of an open index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexOverview {
    /// Live documents.
    pub num_docs: u64,
    /// Exclusive upper bound of document ordinals, counting deleted documents.
    pub max_doc: u32,
    /// Whether any document has been deleted.
    pub has_deletions: bool,
    /// Number of segments.
    pub num_segments: usize,
    /// Every schema field, in schema order.
    pub fields: Vec<FieldOverview>,
}

/// Collects an [`IndexOverview`] for `source`.
///
/// Counting distinct terms walks every term dictionary, so this costs one full scan of the
/// vocabulary.
pub fn overview(source: &TantivySource) -> Result<IndexOverview, IndexError> {
    let mut fields = Vec::new();
    for (_, entry) in source.schema().fields() {
        let mut num_terms = 0u64;
        if matches!(entry.field_type(), FieldType::Str(_)) {
            source.visit_terms(entry.name(), &mut |_, _| {
                num_terms += 1;
                ControlFlow::Continue(())
            })?;
        }
        fields.push(FieldOverview {
            name: entry.name().to_string(),
            indexed: entry.is_indexed(),
            stored: entry.is_stored(),
            has_positions: entry
                .field_type()
                .get_index_record_option()
                .is_some_and(|option| option.has_positions()),
            num_terms,
        });
    }

    Ok(IndexOverview {
        num_docs: source.num_docs(),
        max_doc: source.max_doc(),
        has_deletions: source.has_deletions(),
        num_segments: source.num_segments(),
        fields,
    })
}

#[cfg(test)]
mod test {
    use tempfile::TempDir;

    use super::*;
    use crate::{FieldSpec, IndexWriter};

    #[test]
    fn reports_counts_and_field_options() {
        let temp = TempDir::new().unwrap();
        {
            let mut writer = IndexWriter::create(
                temp.path(),
                &[
                    FieldSpec::text("id"),
                    FieldSpec::text("body").unstored(),
                    FieldSpec::text("tags").without_positions(),
                ],
            )
            .unwrap();
            writer
                .add_document(&[("id", "a"), ("body", "one two"), ("tags", "x")])
                .unwrap();
            writer.commit().unwrap();
            writer
                .add_document(&[("id", "b"), ("body", "two three"), ("tags", "x")])
                .unwrap();
            writer.commit().unwrap();
            writer.delete_term("id", "b").unwrap();
            writer.commit().unwrap();
        }

        let source = TantivySource::open(temp.path()).unwrap();
        let info = overview(&source).unwrap();
        assert_eq!(info.num_docs, 1);
        assert_eq!(info.max_doc, 2);
        assert!(info.has_deletions);
        assert_eq!(info.num_segments, 2);

        let body = &info.fields[1];
        assert_eq!(
            body,
            &FieldOverview {
                name: "body".into(),
                indexed: true,
                stored: false,
                has_positions: true,
                num_terms: 3,
            }
        );
        assert!(!info.fields[2].has_positions);
        assert_eq!(info.fields[2].num_terms, 1);
    }
}
