//! Bounded fuzzy matching over a [`TrieStore`]
//!
//! Finds stored words within an optimal-string-alignment distance `k` of a
//! query (insertions, deletions, substitutions and adjacent transpositions,
//! each costing one edit).
//!
//! Instead of computing a full distance matrix per word, one dynamic-programming
//! row is carried down each path of the tree. The row for a node depends only on
//! its parent's row, its grandparent's row (for transpositions) and the edge
//! character, so every edge costs `O(query length)` work and words sharing a
//! prefix share that work.
//!
//! A row's minimum never decreases further down the tree, so once it exceeds
//! the budget the whole subtree is skipped. Most of a large dictionary diverges
//! from the query within a few characters and is never visited.

use std::cmp::Ordering;

use super::config::DEFAULT_COMPACTION_FACTOR;
use super::trie::{NodeId, ROOT, TrieStore, canonicalize};

/// A word reached during traversal together with its full edit distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FuzzyCandidate {
    pub(crate) word: String,
    pub(crate) distance: usize,
}

/// Ascending distance, then lexicographic. Stored words are already lowercase,
/// so this is the case-insensitive order.
fn by_rank(a: &FuzzyCandidate, b: &FuzzyCandidate) -> Ordering {
    a.distance.cmp(&b.distance).then_with(|| a.word.cmp(&b.word))
}

#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher<'a> {
    store: &'a TrieStore,
    compaction_factor: usize,
}

impl<'a> FuzzyMatcher<'a> {
    pub fn new(store: &'a TrieStore) -> Self {
        Self {
            store,
            compaction_factor: DEFAULT_COMPACTION_FACTOR,
        }
    }

    /// Keep at most `factor × limit` candidates buffered during traversal
    pub fn with_compaction_factor(mut self, factor: usize) -> Self {
        self.compaction_factor = factor.max(1);
        self
    }

    /// Up to `limit` stored words within `max_edits` of `query`, ordered by
    /// ascending distance and then alphabetically.
    pub fn search_fuzzy(&self, query: &str, max_edits: usize, limit: usize) -> Vec<String> {
        self.candidates(query, max_edits, limit)
            .into_iter()
            .map(|candidate| candidate.word)
            .collect()
    }

    pub(crate) fn candidates(
        &self,
        query: &str,
        max_edits: usize,
        limit: usize,
    ) -> Vec<FuzzyCandidate> {
        let query: Vec<char> = canonicalize(query).chars().collect();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let keep = limit.saturating_mul(self.compaction_factor);
        let mut traversal = Traversal {
            query: &query,
            budget: max_edits,
            limit,
            keep,
            rows: vec![(0..=query.len()).collect()],
            word: String::new(),
            candidates: Vec::new(),
        };

        for &(ch, child) in self.store.edges(ROOT) {
            traversal.descend(self.store, child, ch, None, 1);
        }

        let mut candidates = traversal.candidates;
        candidates.sort_by(by_rank);
        candidates.truncate(limit);
        tracing::trace!(
            "Fuzzy search for {:?} (k={}) produced {} candidates",
            query.iter().collect::<String>(),
            max_edits,
            candidates.len()
        );
        candidates
    }
}

struct Traversal<'q> {
    query: &'q [char],
    /// Current acceptance threshold; only ever tightens
    budget: usize,
    limit: usize,
    keep: usize,
    /// `rows[d]` is the row of the node at depth `d` on the current path
    rows: Vec<Vec<usize>>,
    /// Characters on the current path
    word: String,
    candidates: Vec<FuzzyCandidate>,
}

impl Traversal<'_> {
    fn descend(
        &mut self,
        store: &TrieStore,
        node: NodeId,
        ch: char,
        prev: Option<char>,
        depth: usize,
    ) {
        let (row_min, distance) = self.fill_row(ch, prev, depth);
        if row_min > self.budget {
            return;
        }

        self.word.push(ch);
        if store.is_word(node) && distance <= self.budget {
            self.emit(distance);
        }
        for &(next, child) in store.edges(node) {
            self.descend(store, child, next, Some(ch), depth + 1);
        }
        self.word.pop();
    }

    /// Compute the row for the edge `ch` at `depth` from the rows above it.
    /// Returns the row minimum and its last entry (the full edit distance).
    fn fill_row(&mut self, ch: char, prev: Option<char>, depth: usize) -> (usize, usize) {
        let n = self.query.len();
        if self.rows.len() <= depth {
            self.rows.push(vec![0; n + 1]);
        }

        let (above, rest) = self.rows.split_at_mut(depth);
        let row = &mut rest[0];
        let parent = &above[depth - 1];
        let grandparent = depth.checked_sub(2).map(|d| &above[d]);

        row[0] = parent[0] + 1;
        let mut row_min = row[0];
        for j in 1..=n {
            let cost = usize::from(self.query[j - 1] != ch);
            let mut value = (row[j - 1] + 1).min(parent[j] + 1).min(parent[j - 1] + cost);

            if let Some(grandparent) = grandparent {
                if j >= 2 && prev == Some(self.query[j - 1]) && ch == self.query[j - 2] {
                    value = value.min(grandparent[j - 2] + 1);
                }
            }

            row[j] = value;
            row_min = row_min.min(value);
        }

        (row_min, row[n])
    }

    fn emit(&mut self, distance: usize) {
        self.candidates.push(FuzzyCandidate {
            word: self.word.clone(),
            distance,
        });
        if self.candidates.len() >= self.keep.saturating_mul(2) {
            self.compact();
        }
    }

    /// Keep only the best `keep` candidates. Once `limit` of them are held,
    /// anything worse than the `limit`-th can never make the final cut, so the
    /// budget drops to its distance.
    fn compact(&mut self) {
        self.candidates.sort_by(by_rank);
        self.candidates.truncate(self.keep);
        if let Some(worst_kept) = self.candidates.get(self.limit - 1) {
            self.budget = self.budget.min(worst_kept.distance);
        }
    }
}

/// Optimal-string-alignment distance between two strings, compared character
/// by character with no case folding.
pub fn osa_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());
    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut two_ago = vec![0; n + 1];
    let mut prev_row: Vec<usize> = (0..=n).collect();
    let mut curr_row = vec![0; n + 1];

    for i in 1..=m {
        curr_row[0] = i;
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr_row[j] = (prev_row[j] + 1)
                .min(curr_row[j - 1] + 1)
                .min(prev_row[j - 1] + cost);

            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                curr_row[j] = curr_row[j].min(two_ago[j - 2] + 1);
            }
        }
        std::mem::swap(&mut two_ago, &mut prev_row);
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}
