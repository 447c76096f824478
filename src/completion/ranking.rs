//! Query orchestration: exact prefix matches first, fuzzy matches to fill up
//!
//! Ranking algorithm (in order of priority):
//! 1. Exact prefix matches, alphabetical (or by insertion count when
//!    frequency ranking is enabled)
//! 2. Fuzzy matches, by edit distance then alphabetical
//!
//! The fuzzy pass only runs when the exact pass cannot fill the request on its
//! own. Duplicates and the query itself are dropped, and the survivors are
//! re-cased to follow the typed input.

use std::ops::Range;

use rustc_hash::FxHashSet;

use super::case::match_case;
use super::config::CompletionConfig;
use super::fuzzy::FuzzyMatcher;
use super::trie::{TrieStore, canonicalize};

/// Exact prefix search over-fetches by this factor so self-matches can be dropped
const EXACT_FETCH_FACTOR: usize = 2;
/// Fuzzy search over-fetches by this factor to survive de-duplication
const FUZZY_FETCH_FACTOR: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionKind {
    /// The suggestion starts with the typed text
    Exact,
    /// The suggestion is within the edit budget of the typed text
    Fuzzy,
}

/// A single completion result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Completion text, re-cased to match the input
    pub text: String,
    pub kind: SuggestionKind,
    /// Byte range of the input that the completion replaces (the input minus
    /// surrounding whitespace)
    pub replaces: Range<usize>,
}

#[derive(Debug, Clone, Copy)]
pub struct SuggestionRanker<'a> {
    store: &'a TrieStore,
    config: &'a CompletionConfig,
}

impl<'a> SuggestionRanker<'a> {
    pub fn new(store: &'a TrieStore, config: &'a CompletionConfig) -> Self {
        Self { store, config }
    }

    /// Up to `limit` completion strings for `prefix`
    pub fn get_suggestions(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.suggest(prefix, limit)
            .into_iter()
            .map(|suggestion| suggestion.text)
            .collect()
    }

    /// Up to `limit` suggestions for `prefix`, exact matches before fuzzy ones
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<Suggestion> {
        let typed = prefix.trim();
        if typed.is_empty() || limit == 0 {
            return Vec::new();
        }
        let start = prefix.len() - prefix.trim_start().len();
        let replaces = start..start + typed.len();
        let query = canonicalize(typed);

        // Frequency order can promote any word under the prefix, so fetch them all
        let fetch = if self.config.rank_by_frequency {
            usize::MAX
        } else {
            limit.saturating_mul(EXACT_FETCH_FACTOR)
        };
        let mut exact: Vec<String> = self
            .store
            .search_prefix(&query, fetch)
            .into_iter()
            .filter(|word| *word != query)
            .collect();
        if self.config.rank_by_frequency {
            // Stable: equal counts keep alphabetical order
            exact.sort_by_key(|word| std::cmp::Reverse(self.store.frequency(word).unwrap_or(0)));
        }

        let fuzzy = if exact.len() >= limit {
            Vec::new()
        } else {
            let budget = self.config.edit_budget.for_length(query.chars().count());
            FuzzyMatcher::new(self.store)
                .with_compaction_factor(self.config.compaction_factor)
                .search_fuzzy(&query, budget, limit.saturating_mul(FUZZY_FETCH_FACTOR))
        };

        tracing::debug!(
            "Suggestions for {:?}: {} exact, {} fuzzy candidates",
            typed,
            exact.len(),
            fuzzy.len()
        );

        let mut seen = FxHashSet::default();
        seen.insert(query);

        exact
            .into_iter()
            .map(|word| (word, SuggestionKind::Exact))
            .chain(fuzzy.into_iter().map(|word| (word, SuggestionKind::Fuzzy)))
            .filter(|(word, _)| seen.insert(word.to_lowercase()))
            .take(limit)
            .map(|(word, kind)| Suggestion {
                text: match_case(&word, typed),
                kind,
                replaces: replaces.clone(),
            })
            .collect()
    }
}
