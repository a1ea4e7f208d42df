//! Field layouts for indexes created by lupe's [`IndexWriter`](crate::IndexWriter).
//!
//! A [`FieldSpec`] declares how one text field is kept: whether its value is stored, whether it is
//! indexed with positions, and whether stop words are removed at indexing time. Together these
//! decide what a reconstruction of the field can recover.

use tantivy::schema::{Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions};

use crate::analyzer::{LUPE_STOPWORD_TOKENIZER, LUPE_TOKENIZER};

/// Indexing options for a single text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,
    /// Keep the original value in the document store.
    pub stored: bool,
    /// Add the value's terms to the inverted index.
    pub indexed: bool,
    /// Record term positions.
    pub positions: bool,
    /// Remove English stop words before indexing.
    pub stopwords: bool,
}

impl FieldSpec {
    /// A stored text field with positions and no stop-word removal.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stored: true,
            indexed: true,
            positions: true,
            stopwords: false,
        }
    }

    /// A field kept only in the document store, with no terms in the index.
    pub fn stored_only(name: impl Into<String>) -> Self {
        Self {
            indexed: false,
            ..Self::text(name)
        }
    }

    /// Does not store the field value.
    pub fn unstored(mut self) -> Self {
        self.stored = false;
        self
    }

    /// Records only document frequencies and term frequencies, without positions.
    pub fn without_positions(mut self) -> Self {
        self.positions = false;
        self
    }

    /// Removes English stop words at indexing time.
    pub fn with_stopwords(mut self) -> Self {
        self.stopwords = true;
        self
    }

    /// Tantivy options for this field.
    fn options(&self) -> TextOptions {
        if !self.indexed {
            return TextOptions::default().set_stored();
        }
        let tokenizer = if self.stopwords {
            LUPE_STOPWORD_TOKENIZER
        } else {
            LUPE_TOKENIZER
        };
        let record = if self.positions {
            IndexRecordOption::WithFreqsAndPositions
        } else {
            IndexRecordOption::WithFreqs
        };
        let options = TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(tokenizer)
                .set_index_option(record),
        );
        if self.stored {
            options.set_stored()
        } else {
            options
        }
    }
}

/// Builds a schema from field specs, returning field handles in spec order.
pub fn build_schema(specs: &[FieldSpec]) -> (Schema, Vec<Field>) {
    let mut builder = Schema::builder();
    let fields = specs
        .iter()
        .map(|spec| builder.add_text_field(&spec.name, spec.options()))
        .collect();
    (builder.build(), fields)
}
