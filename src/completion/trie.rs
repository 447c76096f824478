//! Mutable prefix tree holding the completion vocabulary
//!
//! Nodes live in an arena (`Vec<TrieNode>`) and refer to each other by index.
//! Each node keeps its outgoing edges as a vector of `(char, NodeId)` pairs
//! sorted by character, so every traversal visits children in alphabetical
//! order without a separate sort.
//!
//! Invariants maintained by every mutation:
//! - every reachable node spells exactly one canonical (trimmed, lowercase) prefix
//! - `is_word` is set iff that prefix was inserted and not removed since
//! - apart from the root, no reachable node is both childless and not a word;
//!   removal prunes such nodes bottom-up and their slots go on a free list that
//!   later insertions reuse

/// Index of a node in the arena
pub(crate) type NodeId = usize;

pub(crate) const ROOT: NodeId = 0;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    /// Outgoing edges, sorted by character
    edges: Vec<(char, NodeId)>,
    is_word: bool,
    /// Number of times the word ending here has been inserted
    frequency: u32,
}

impl TrieNode {
    fn child(&self, ch: char) -> Option<NodeId> {
        self.edges
            .binary_search_by_key(&ch, |&(c, _)| c)
            .ok()
            .map(|pos| self.edges[pos].1)
    }
}

/// Case folding applied to every word and query before it touches the tree.
pub(crate) fn canonicalize(word: &str) -> String {
    word.trim().to_lowercase()
}

#[derive(Debug, Clone)]
pub struct TrieStore {
    nodes: Vec<TrieNode>,
    /// Arena slots released by pruning
    free: Vec<NodeId>,
    word_count: usize,
    min_word_length: usize,
}

impl Default for TrieStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrieStore {
    pub fn new() -> Self {
        Self::with_min_word_length(super::config::DEFAULT_MIN_WORD_LENGTH)
    }

    /// Create an empty store that ignores words shorter than `min_word_length`
    /// characters. A minimum of zero is treated as one: the empty word is never stored.
    pub fn with_min_word_length(min_word_length: usize) -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            free: Vec::new(),
            word_count: 0,
            min_word_length: min_word_length.max(1),
        }
    }

    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }

    /// Number of distinct stored words
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Remove every word, keeping the configured minimum length
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(TrieNode::default());
        self.free.clear();
        self.word_count = 0;
    }

    /// Insert a word. Returns `true` if it was not already present.
    ///
    /// Words shorter than the minimum length (after trimming) are ignored.
    /// Re-inserting an existing word only bumps its frequency.
    pub fn insert(&mut self, word: &str) -> bool {
        let canonical = canonicalize(word);
        if canonical.chars().count() < self.min_word_length {
            return false;
        }

        let mut node = ROOT;
        for ch in canonical.chars() {
            node = match self.nodes[node].child(ch) {
                Some(child) => child,
                None => self.attach(node, ch),
            };
        }

        let terminal = &mut self.nodes[node];
        terminal.frequency = terminal.frequency.saturating_add(1);
        if terminal.is_word {
            return false;
        }
        terminal.is_word = true;
        self.word_count += 1;
        true
    }

    /// Remove a word. Returns `true` if it was present.
    ///
    /// Nodes left childless and wordless by the removal are pruned, walking
    /// back up the path until a node still in use is reached.
    pub fn remove(&mut self, word: &str) -> bool {
        let canonical = canonicalize(word);
        if canonical.is_empty() {
            return false;
        }

        // (parent, label, child) for each edge on the path
        let mut path: Vec<(NodeId, char, NodeId)> = Vec::with_capacity(canonical.len());
        let mut node = ROOT;
        for ch in canonical.chars() {
            let Some(child) = self.nodes[node].child(ch) else {
                return false;
            };
            path.push((node, ch, child));
            node = child;
        }

        let terminal = &mut self.nodes[node];
        if !terminal.is_word {
            return false;
        }
        terminal.is_word = false;
        terminal.frequency = 0;
        self.word_count -= 1;

        for &(parent, label, child) in path.iter().rev() {
            let child_node = &self.nodes[child];
            if child_node.is_word || !child_node.edges.is_empty() {
                break;
            }
            self.detach(parent, label, child);
        }

        true
    }

    pub fn has_word(&self, word: &str) -> bool {
        let canonical = canonicalize(word);
        !canonical.is_empty()
            && self
                .find(&canonical)
                .is_some_and(|node| self.nodes[node].is_word)
    }

    /// How many times `word` has been inserted, or `None` if it is not stored
    pub fn frequency(&self, word: &str) -> Option<u32> {
        let canonical = canonicalize(word);
        if canonical.is_empty() {
            return None;
        }
        self.find(&canonical)
            .map(|node| &self.nodes[node])
            .filter(|node| node.is_word)
            .map(|node| node.frequency)
    }

    /// Up to `limit` stored words starting with `prefix`, in alphabetical order.
    ///
    /// The prefix itself comes first when it is a stored word. An empty prefix
    /// or one with no matching node yields nothing.
    pub fn search_prefix(&self, prefix: &str, limit: usize) -> Vec<String> {
        let canonical = canonicalize(prefix);
        if canonical.is_empty() || limit == 0 {
            return Vec::new();
        }
        let Some(start) = self.find(&canonical) else {
            return Vec::new();
        };

        let mut results = Vec::new();
        let mut buffer = canonical;
        self.collect_words(start, &mut buffer, limit, &mut results);
        results
    }

    /// Every stored word in alphabetical order
    pub fn words(&self) -> Vec<String> {
        let mut results = Vec::with_capacity(self.word_count);
        let mut buffer = String::new();
        self.collect_words(ROOT, &mut buffer, usize::MAX, &mut results);
        results
    }

    // Traversal shape used by the fuzzy matcher

    pub(crate) fn edges(&self, node: NodeId) -> &[(char, NodeId)] {
        &self.nodes[node].edges
    }

    pub(crate) fn is_word(&self, node: NodeId) -> bool {
        self.nodes[node].is_word
    }

    fn find(&self, canonical: &str) -> Option<NodeId> {
        canonical
            .chars()
            .try_fold(ROOT, |node, ch| self.nodes[node].child(ch))
    }

    /// Depth-first, alphabetical; `buffer` holds the prefix spelled by `node`.
    /// Callers guarantee `out.len() < limit` on entry.
    fn collect_words(
        &self,
        node: NodeId,
        buffer: &mut String,
        limit: usize,
        out: &mut Vec<String>,
    ) {
        let current = &self.nodes[node];
        if current.is_word {
            out.push(buffer.clone());
        }
        for &(ch, child) in &current.edges {
            if out.len() >= limit {
                return;
            }
            buffer.push(ch);
            self.collect_words(child, buffer, limit, out);
            buffer.pop();
        }
    }

    fn attach(&mut self, parent: NodeId, ch: char) -> NodeId {
        let id = match self.free.pop() {
            Some(id) => {
                self.nodes[id] = TrieNode::default();
                id
            }
            None => {
                self.nodes.push(TrieNode::default());
                self.nodes.len() - 1
            }
        };

        let edges = &mut self.nodes[parent].edges;
        let pos = match edges.binary_search_by_key(&ch, |&(c, _)| c) {
            Ok(pos) | Err(pos) => pos,
        };
        edges.insert(pos, (ch, id));
        id
    }

    fn detach(&mut self, parent: NodeId, ch: char, child: NodeId) {
        let edges = &mut self.nodes[parent].edges;
        if let Ok(pos) = edges.binary_search_by_key(&ch, |&(c, _)| c) {
            edges.remove(pos);
        }
        // Drop the edge vector's allocation along with the slot
        self.nodes[child] = TrieNode::default();
        self.free.push(child);
    }
}

impl<S: AsRef<str>> Extend<S> for TrieStore {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for TrieStore {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}
