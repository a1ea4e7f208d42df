//! Highest document-frequency term extraction.
//!
//! [`TopTermsCollector`] scans the term dictionaries of one or more fields and keeps the `K`
//! terms that occur in the most documents. Working memory is bounded by `K`, not by the size of
//! the vocabulary, so scanning a large index is a long read but never a large allocation.

use std::{cmp::Ordering, collections::HashSet, ops::ControlFlow};

use serde::Serialize;
use tracing::debug;

use crate::{
    AnalysisError, BoundedTopK, IndexSource, JunkWords, ProgressReporter, SilentReporter,
    progress::ProgressTracker,
};

/// Number of terms returned when the caller does not ask for a specific count.
pub const DEFAULT_TOP_TERMS: usize = 100;

/// A term together with the number of documents containing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TermStat {
    /// Field the term was indexed in.
    pub field: String,
    /// Indexed term text.
    pub text: String,
    /// Number of documents containing the term at least once.
    pub doc_freq: u64,
}

impl TermStat {
    /// Creates a new term statistic.
    pub fn new(field: impl Into<String>, text: impl Into<String>, doc_freq: u64) -> Self {
        Self {
            field: field.into(),
            text: text.into(),
            doc_freq,
        }
    }

    /// Ranks two statistics: higher document frequency first, then field and text ascending.
    ///
    /// `Ordering::Greater` means `self` ranks above `other`.
    pub fn rank(&self, other: &Self) -> Ordering {
        self.doc_freq
            .cmp(&other.doc_freq)
            .then_with(|| other.field.cmp(&self.field))
            .then_with(|| other.text.cmp(&self.text))
    }
}

impl Ord for TermStat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank(other)
    }
}

impl PartialOrd for TermStat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Collects the highest document-frequency terms from an index.
pub struct TopTermsCollector<S> {
    /// Index being scanned.
    source: S,
}

impl<S: IndexSource> TopTermsCollector<S> {
    /// Creates a collector reading from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns the `limit` terms with the highest document frequency across `fields`.
    ///
    /// An empty `fields` slice scans every field of the index. Fields missing from the index are
    /// skipped. Terms in `excluded` are ignored entirely. The result is sorted by document
    /// frequency descending, ties broken by field and then term text ascending.
    pub fn collect(
        &self,
        fields: &[String],
        limit: usize,
        excluded: Option<&JunkWords>,
    ) -> Result<Vec<TermStat>, AnalysisError> {
        self.collect_with_progress(fields, limit, excluded, &mut SilentReporter)
    }

    /// Like [`collect`](Self::collect), reporting progress as fields are scanned.
    pub fn collect_with_progress(
        &self,
        fields: &[String],
        limit: usize,
        excluded: Option<&JunkWords>,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<Vec<TermStat>, AnalysisError> {
        let mut topk = BoundedTopK::new(limit)?;

        let fields = if fields.is_empty() {
            self.source.field_names()
        } else {
            dedup_fields(fields)
        };

        let mut total = 0;
        for field in &fields {
            total += self.source.num_terms(field)?;
        }
        let mut progress = ProgressTracker::new(reporter, total);

        for field in &fields {
            let mut scanned = 0u64;
            let found = self.source.visit_terms(field, &mut |text, doc_freq| {
                scanned += 1;
                if excluded.is_some_and(|junk| junk.contains(text)) {
                    return ControlFlow::Continue(());
                }
                // Cheap rejection before allocating the candidate.
                if topk.is_full()
                    && topk
                        .peek_min()
                        .is_some_and(|min: &TermStat| doc_freq < min.doc_freq)
                {
                    return ControlFlow::Continue(());
                }
                topk.insert(TermStat::new(field.as_str(), text, doc_freq));
                ControlFlow::Continue(())
            })?;

            if found {
                debug!(field = %field, terms = scanned, "scanned field");
            } else {
                debug!(field = %field, "field not present in index, skipping");
            }
            progress.advance(scanned);
        }

        progress.finish();
        Ok(topk.into_sorted_vec())
    }
}

/// Removes repeated field names, keeping the first occurrence.
fn dedup_fields(fields: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    fields
        .iter()
        .filter(|f| seen.insert(f.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;
    use crate::MemorySource;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn fruit_index() -> MemorySource {
        let mut index = MemorySource::new();
        index.add_document(&[("body", "apple banana cherry")]);
        index.add_document(&[("body", "apple cherry")]);
        index.add_document(&[("body", "apple")]);
        index
    }

    #[test]
    fn returns_highest_doc_freq_terms() {
        let index = fruit_index();
        let collector = TopTermsCollector::new(&index);

        let top = collector.collect(&fields(&["body"]), 2, None).unwrap();
        assert_eq!(
            top,
            vec![
                TermStat::new("body", "apple", 3),
                TermStat::new("body", "cherry", 2),
            ]
        );
    }

    #[test]
    fn zero_limit_is_invalid() {
        let index = fruit_index();
        let err = TopTermsCollector::new(&index)
            .collect(&fields(&["body"]), 0, None)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidArgument(_)));
    }

    #[test]
    fn limit_beyond_vocabulary_returns_everything() {
        let index = fruit_index();
        let top = TopTermsCollector::new(&index)
            .collect(&fields(&["body"]), 50, None)
            .unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[2], TermStat::new("body", "banana", 1));
    }

    #[test]
    fn empty_index_and_empty_fields_yield_nothing() {
        let index = MemorySource::new();
        let top = TopTermsCollector::new(&index).collect(&[], 5, None).unwrap();
        assert!(top.is_empty());
    }

    #[test]
    fn empty_field_list_scans_all_fields() {
        let mut index = fruit_index();
        index.add_document(&[("title", "apple pie")]);
        let top = TopTermsCollector::new(&index).collect(&[], 10, None).unwrap();

        assert_eq!(top.len(), 5);
        assert!(top.contains(&TermStat::new("title", "pie", 1)));
    }

    #[test]
    fn missing_fields_are_skipped() {
        let index = fruit_index();
        let top = TopTermsCollector::new(&index)
            .collect(&fields(&["nope", "body"]), 1, None)
            .unwrap();
        assert_eq!(top, vec![TermStat::new("body", "apple", 3)]);
    }

    #[test]
    fn excluded_terms_do_not_count_toward_limit() {
        let index = fruit_index();
        let junk: JunkWords = ["apple"].into_iter().collect();
        let top = TopTermsCollector::new(&index)
            .collect(&fields(&["body"]), 2, Some(&junk))
            .unwrap();
        assert_eq!(
            top,
            vec![
                TermStat::new("body", "cherry", 2),
                TermStat::new("body", "banana", 1),
            ]
        );
    }

    #[test]
    fn ties_break_on_field_then_text() {
        let mut index = MemorySource::new();
        index.add_document(&[("b", "zeta alpha"), ("a", "omega")]);
        let top = TopTermsCollector::new(&index).collect(&[], 2, None).unwrap();
        assert_eq!(
            top,
            vec![TermStat::new("a", "omega", 1), TermStat::new("b", "alpha", 1)]
        );
    }

    #[test]
    fn repeated_fields_are_scanned_once() {
        let index = fruit_index();
        let top = TopTermsCollector::new(&index)
            .collect(&fields(&["body", "body"]), 10, None)
            .unwrap();
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn unavailable_index_propagates() {
        let mut index = fruit_index();
        index.set_unavailable(true);
        let err = TopTermsCollector::new(&index)
            .collect(&fields(&["body"]), 2, None)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::IndexUnavailable(_)));
    }

    #[test]
    fn greater_rank_orders_first() {
        let mut stats = vec![
            TermStat::new("b", "x", 2),
            TermStat::new("a", "y", 2),
            TermStat::new("a", "z", 5),
        ];
        stats.sort_by(|a, b| b.cmp(a));
        assert_eq!(stats[0], TermStat::new("a", "z", 5));
        assert_eq!(stats[1], TermStat::new("a", "y", 2));
    }

    #[test]
    fn reports_progress_to_completion() {
        let index = fruit_index();
        let mut seen = Vec::new();
        let mut reporter = |p: u8| seen.push(p);
        TopTermsCollector::new(&index)
            .collect_with_progress(&fields(&["body"]), 2, None, &mut reporter)
            .unwrap();
        assert_eq!(seen.last(), Some(&100));
    }

    /// Builds an index where every `(field, term)` pair has the requested document frequency.
    fn index_with_freqs(stats: &[(u8, u8, u8)]) -> MemorySource {
        let mut index = MemorySource::new();
        for &(field, term, freq) in stats {
            index.set_doc_freq(&format!("f{field}"), &format!("t{term}"), u64::from(freq));
        }
        index
    }

    fn expected_top(index: &MemorySource, k: usize) -> Vec<TermStat> {
        let mut all = Vec::new();
        for field in index.field_names() {
            index
                .visit_terms(&field, &mut |text, df| {
                    all.push(TermStat::new(field.as_str(), text, df));
                    ControlFlow::Continue(())
                })
                .unwrap();
        }
        all.sort_by(|a, b| b.rank(a));
        all.truncate(k);
        all
    }

    proptest! {
        #[test]
        fn collect_matches_full_sort(
            stats in proptest::collection::vec((0u8..3, 0u8..20, 0u8..50), 0..80),
            k in 1usize..25,
        ) {
            let index = index_with_freqs(&stats);
            let collector = TopTermsCollector::new(&index);
            let top = collector.collect(&[], k, None).unwrap();

            prop_assert!(top.len() <= k);
            prop_assert_eq!(&top, &expected_top(&index, k));
            prop_assert!(top.windows(2).all(|w| w[0].doc_freq >= w[1].doc_freq));

            // Idempotent.
            prop_assert_eq!(&top, &collector.collect(&[], k, None).unwrap());

            // Dropping the winner leaves the next K-1.
            if k > 1 && !top.is_empty() {
                let mut without = index.clone();
                without.remove_term(&top[0].field, &top[0].text);
                let rest = TopTermsCollector::new(&without).collect(&[], k - 1, None).unwrap();
                prop_assert_eq!(&rest[..], &top[1..]);
            }
        }
    }
}
