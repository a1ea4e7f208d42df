//! Block-lists of terms to leave out of analysis results.
//!
//! Junk words never count toward the top-terms limit and are treated as unresolved positions
//! during reconstruction. A list can be seeded from the stopword lists of the `stop-words` crate
//! and extended with arbitrary terms.

use std::collections::HashSet;

use stop_words::LANGUAGE;

use crate::AnalysisError;

/// A set of terms excluded from analysis.
///
/// Matching is exact: index terms are usually already normalized by the analyzer, so no case
/// folding is applied here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JunkWords {
    /// Excluded terms.
    words: HashSet<String>,
}

impl JunkWords {
    /// Creates an empty block-list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a block-list containing the stopwords for `language`.
    ///
    /// Fails with [`AnalysisError::InvalidArgument`] for unsupported language names.
    pub fn stopwords(language: &str) -> Result<Self, AnalysisError> {
        let mut junk = Self::new();
        junk.extend(stop_words::get(parse_stopword_language(language)?).iter().copied());
        Ok(junk)
    }

    /// Adds a single term.
    pub fn insert(&mut self, term: impl Into<String>) {
        self.words.insert(term.into());
    }

    /// Returns true if `term` is excluded.
    pub fn contains(&self, term: &str) -> bool {
        self.words.contains(term)
    }

    /// Number of excluded terms.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> Extend<S> for JunkWords {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.words.extend(iter.into_iter().map(Into::into));
    }
}

impl<S: Into<String>> FromIterator<S> for JunkWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut junk = Self::new();
        junk.extend(iter);
        junk
    }
}

/// Maps a lowercase language name onto a `stop-words` language.
fn parse_stopword_language(name: &str) -> Result<LANGUAGE, AnalysisError> {
    match name.to_lowercase().as_str() {
        "dutch" => Ok(LANGUAGE::Dutch),
        "english" => Ok(LANGUAGE::English),
        "french" => Ok(LANGUAGE::French),
        "german" => Ok(LANGUAGE::German),
        "italian" => Ok(LANGUAGE::Italian),
        "portuguese" => Ok(LANGUAGE::Portuguese),
        "russian" => Ok(LANGUAGE::Russian),
        "spanish" => Ok(LANGUAGE::Spanish),
        other => Err(AnalysisError::InvalidArgument(format!(
            "unsupported stopword language: {other}"
        ))),
    }
}
