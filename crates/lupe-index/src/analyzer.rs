//! Text analyzers registered on every index lupe opens or creates.
//!
//! Two pipelines share a tokenizer name prefix:
//! - `lupe_text`: `SimpleTokenizer`, `LowerCaser`, `RemoveLongFilter`
//! - `lupe_text_stop`: the same, followed by an English `StopWordFilter`
//!
//! The stop-word filter drops tokens without renumbering positions, so fields analyzed with it
//! carry position gaps where the stop words were.

use stop_words::LANGUAGE;
use tantivy::{
    Index,
    tokenizer::{LowerCaser, RemoveLongFilter, SimpleTokenizer, StopWordFilter, TextAnalyzer},
};

/// Tokenizer for plain text fields.
pub const LUPE_TOKENIZER: &str = "lupe_text";

/// Tokenizer for text fields with English stop words removed.
pub const LUPE_STOPWORD_TOKENIZER: &str = "lupe_text_stop";

/// Maximum token length in bytes before filtering.
const MAX_TOKEN_LENGTH: usize = 40;

/// Builds the plain analyzer.
pub fn build_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .build()
}

/// Builds the analyzer that removes English stop words.
///
/// Uses the same word list as [`lupe_core::JunkWords::stopwords`] so that index-time removal and
/// query-time exclusion agree.
pub fn build_stopword_analyzer() -> TextAnalyzer {
    let words = stop_words::get(LANGUAGE::English)
        .iter()
        .map(|w| w.to_string());
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .filter(StopWordFilter::remove(words))
        .build()
}

/// Registers both analyzers with `index`.
pub fn register_analyzers(index: &Index) {
    let tokenizers = index.tokenizers();
    tokenizers.register(LUPE_TOKENIZER, build_analyzer());
    tokenizers.register(LUPE_STOPWORD_TOKENIZER, build_stopword_analyzer());
}

#[cfg(test)]
mod test {
    use std::iter;

    use tantivy::tokenizer::TokenStream;

    use super::*;

    /// Runs `text` through `analyzer`, returning `(text, position)` pairs.
    fn tokens(mut analyzer: TextAnalyzer, text: &str) -> Vec<(String, usize)> {
        let mut stream = analyzer.token_stream(text);
        iter::from_fn(|| stream.next().map(|t| (t.text.clone(), t.position))).collect()
    }

    #[test]
    fn lowercases_and_splits_punctuation() {
        let out = tokens(build_analyzer(), "Hello, World! foo-bar");
        let words: Vec<_> = out.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(words, vec!["hello", "world", "foo", "bar"]);
    }

    #[test]
    fn removes_long_tokens() {
        let long = "a".repeat(50);
        let out = tokens(build_analyzer(), &format!("short {long} word"));
        let words: Vec<_> = out.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(words, vec!["short", "word"]);
    }

    #[test]
    fn stop_words_leave_position_gaps() {
        let out = tokens(build_stopword_analyzer(), "the tantivy and the lucene");
        assert_eq!(
            out,
            vec![("tantivy".to_string(), 1), ("lucene".to_string(), 4)]
        );
    }
}
