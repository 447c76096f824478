//! Typo-tolerant word completion
//!
//! This module provides:
//! - A mutable prefix tree with ordered prefix enumeration ([`TrieStore`])
//! - Bounded fuzzy matching over that tree ([`FuzzyMatcher`])
//! - Merging, de-duplication and re-casing of results ([`SuggestionRanker`])
//! - A session object owning one dictionary and its policy ([`WordCompleter`])

pub mod case;
pub mod config;
pub mod dictionary;
pub mod fuzzy;
pub mod ranking;
pub mod trie;

pub use case::match_case;
pub use config::{BudgetStep, CompletionConfig, EditBudget};
pub use fuzzy::{FuzzyMatcher, osa_distance};
pub use ranking::{Suggestion, SuggestionKind, SuggestionRanker};
pub use trie::TrieStore;

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;

/// One completion session: a dictionary plus the policy used to query it.
///
/// Queries take `&self` and mutations `&mut self`, so the single-writer rule is
/// enforced by the borrow checker. Use [`SharedCompleter`] to share a session
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct WordCompleter {
    store: TrieStore,
    config: CompletionConfig,
}

impl WordCompleter {
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            store: TrieStore::with_min_word_length(config.min_word_length),
            config,
        }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    pub fn store(&self) -> &TrieStore {
        &self.store
    }

    /// Up to `limit` completions for the partially typed `prefix`
    pub fn get_suggestions(&self, prefix: &str, limit: usize) -> Vec<String> {
        SuggestionRanker::new(&self.store, &self.config).get_suggestions(prefix, limit)
    }

    /// Like [`get_suggestions`](Self::get_suggestions), keeping match kind and replaced range
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<Suggestion> {
        SuggestionRanker::new(&self.store, &self.config).suggest(prefix, limit)
    }

    /// Fuzzy matches only, using an explicit edit budget
    pub fn search_fuzzy(&self, query: &str, max_edits: usize, limit: usize) -> Vec<String> {
        FuzzyMatcher::new(&self.store)
            .with_compaction_factor(self.config.compaction_factor)
            .search_fuzzy(query, max_edits, limit)
    }

    /// Add a custom word. Returns `true` if it was not already known.
    pub fn add_word(&mut self, word: &str) -> bool {
        let added = self.store.insert(word);
        if added {
            tracing::debug!("Added word {:?}", word.trim());
        }
        added
    }

    /// Remove a word. Returns `true` if it was known.
    pub fn remove_word(&mut self, word: &str) -> bool {
        let removed = self.store.remove(word);
        if removed {
            tracing::debug!("Removed word {:?}", word.trim());
        }
        removed
    }

    pub fn has_word(&self, word: &str) -> bool {
        self.store.has_word(word)
    }

    /// Add every word from the given dictionary files. Nothing is added if
    /// any file cannot be read.
    pub fn load_dictionaries(&mut self, paths: &[impl AsRef<Path>]) -> Result<usize> {
        dictionary::load_into(&mut self.store, paths)
    }

    /// Replace the whole vocabulary with the contents of the given files.
    /// On error the current vocabulary is kept.
    pub fn reload_dictionaries(&mut self, paths: &[impl AsRef<Path>]) -> Result<usize> {
        let mut fresh = TrieStore::with_min_word_length(self.config.min_word_length);
        let added = dictionary::load_into(&mut fresh, paths)?;
        self.store = fresh;
        Ok(added)
    }
}

impl<S: AsRef<str>> Extend<S> for WordCompleter {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.store.extend(iter);
    }
}

/// A [`WordCompleter`] behind a read-write lock: any number of concurrent
/// queries, one mutation at a time.
#[derive(Debug, Clone, Default)]
pub struct SharedCompleter {
    inner: Arc<RwLock<WordCompleter>>,
}

impl SharedCompleter {
    pub fn new(completer: WordCompleter) -> Self {
        Self {
            inner: Arc::new(RwLock::new(completer)),
        }
    }

    pub fn get_suggestions(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.inner.read().get_suggestions(prefix, limit)
    }

    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<Suggestion> {
        self.inner.read().suggest(prefix, limit)
    }

    pub fn add_word(&self, word: &str) -> bool {
        self.inner.write().add_word(word)
    }

    pub fn remove_word(&self, word: &str) -> bool {
        self.inner.write().remove_word(word)
    }

    pub fn has_word(&self, word: &str) -> bool {
        self.inner.read().has_word(word)
    }

    pub fn len(&self) -> usize {
        self.inner.read().store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the vocabulary with the given files.
    ///
    /// The new tree is built without holding the lock; readers keep seeing the
    /// old vocabulary until it is swapped in. On error nothing changes.
    pub fn reload_dictionaries(&self, paths: &[impl AsRef<Path>]) -> Result<usize> {
        let min_word_length = self.inner.read().config().min_word_length;
        let mut fresh = TrieStore::with_min_word_length(min_word_length);
        let added = dictionary::load_into(&mut fresh, paths)?;
        self.inner.write().store = fresh;
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::thread;

    #[test]
    fn test_add_and_remove_words() {
        let mut completer = WordCompleter::default();
        assert!(completer.add_word("Rustacean"));
        assert!(!completer.add_word("rustacean"));
        assert_eq!(completer.get_suggestions("rust", 5), vec!["rustacean"]);

        assert!(completer.remove_word("RUSTACEAN"));
        assert!(!completer.remove_word("rustacean"));
        assert!(completer.get_suggestions("rust", 5).is_empty());
    }

    #[test]
    fn test_config_min_length_applies_to_store() {
        let config = CompletionConfig { min_word_length: 4, ..Default::default() };
        let mut completer = WordCompleter::new(config);
        assert!(!completer.add_word("cat"));
        assert!(completer.add_word("cats"));
        assert_eq!(completer.store().min_word_length(), 4);
    }

    #[test]
    fn test_reload_keeps_vocabulary_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words.txt");
        fs::write(&words, "orange\nolive\n").unwrap();

        let mut completer = WordCompleter::default();
        completer.extend(["apple"]);
        assert!(completer.reload_dictionaries(&[dir.path().join("missing.txt")]).is_err());
        assert!(completer.has_word("apple"));

        assert_eq!(completer.reload_dictionaries(&[&words]).unwrap(), 2);
        assert!(!completer.has_word("apple"));
        assert_eq!(completer.get_suggestions("o", 5), vec!["olive", "orange"]);
    }

    #[test]
    fn test_shared_completer_concurrent_reads() {
        let mut completer = WordCompleter::default();
        completer.extend(["thread", "threat", "three", "throw"]);
        let shared = SharedCompleter::new(completer);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.get_suggestions("thr", 10))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), vec!["thread", "threat", "three", "throw"]);
        }

        assert!(shared.add_word("thrill"));
        assert_eq!(shared.len(), 5);
        assert!(shared.remove_word("throw"));
        assert!(!shared.has_word("throw"));
    }

    #[test]
    fn test_shared_reload() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words.txt");
        fs::write(&words, "kiwi\nkumquat\n").unwrap();

        let shared = SharedCompleter::default();
        shared.add_word("lime");
        assert_eq!(shared.reload_dictionaries(&[&words]).unwrap(), 2);
        assert!(!shared.has_word("lime"));
        assert_eq!(shared.get_suggestions("k", 5), vec!["kiwi", "kumquat"]);
    }
}
