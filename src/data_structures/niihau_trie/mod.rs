//! Niihau Trie Implementation
//!
//! This module provides an uncompressed prefix tree that stores a set (or,
//! optionally, a multiset) of words and answers four kinds of questions:
//! exact membership, how many words share a prefix, which words share a
//! prefix, and which words lie within a bounded Levenshtein distance of a
//! query.
//!
//! Every node keeps a count of the stored words passing through it, so
//! [`NiihauTrie::count_with_prefix`] is O(prefix length) no matter how many
//! words share the prefix. [`NiihauTrie::remove`] walks back up the parent
//! links decrementing those counts and prunes every node no stored word
//! passes through anymore.
//!
//! Nodes live in an arena owned by the trie. A child is owned through its
//! parent's `children` map; the `parent` back-reference is an arena index.
//!
//! # Example
//!
//! ```
//! use niihau_lib::data_structures::niihau_trie::NiihauTrie;
//!
//! let mut trie = NiihauTrie::new();
//! for name in ["Joe", "John", "Johny", "Johnny", "Jane", "Jack"] {
//!     trie.add(name);
//! }
//!
//! assert_eq!(trie.count_with_prefix("John"), 3);
//! assert!(trie.remove("Johnny"));
//! assert_eq!(trie.words_with_prefix("John").collect::<Vec<_>>(), ["John", "Johny"]);
//! assert_eq!(trie.most_similar("Jahn", 1).map(|m| m.word), Some("John".to_string()));
//! ```

mod config;
mod encoding;
mod error;
mod fuzzy;
mod iter;
mod node;
mod shared;

use std::borrow::Cow;

pub use config::{DuplicatePolicy, NiihauTrieConfig};
pub use encoding::TextEncoding;
pub use error::NiihauTrieError;
pub use fuzzy::{levenshtein_distance, FuzzyMatch};
pub use iter::WordsWithPrefix;
pub use shared::SharedNiihauTrie;

use node::{NodeId, TrieNode, ROOT_ID};

/// Result type for Niihau Trie operations
pub type NiihauTrieResult<T> = Result<T, NiihauTrieError>;

/// Niihau Trie is a counting prefix tree over characters.
///
/// Key features:
/// * Case-insensitive keys (configurable)
/// * Encoding normalization of every input string
/// * O(depth) prefix counts maintained at insert/remove time
/// * Pruning removal that never leaves an empty branch behind
/// * Lazy, side-effect-free prefix enumeration in character order
/// * Levenshtein search sharing DP rows along common prefixes
///
/// The trie is not synchronised. Wrap it in [`SharedNiihauTrie`] to share it
/// between threads.
#[derive(Debug, Clone)]
pub struct NiihauTrie {
    /// Node arena. Slot [`ROOT_ID`] holds the sentinel root.
    nodes: Vec<TrieNode>,

    /// Slots released by pruning, reused by later insertions
    free: Vec<NodeId>,

    /// Number of stored words (occurrences, under the multiset policy)
    word_count: usize,

    /// Configuration options
    config: NiihauTrieConfig,
}

impl NiihauTrie {
    /// Creates a new empty `NiihauTrie` with default configuration.
    ///
    /// # Returns
    ///
    /// A new case-sensitive, UTF-8, set-semantics `NiihauTrie`.
    pub fn new() -> Self {
        Self::with_config(NiihauTrieConfig::default())
    }

    /// Creates a new empty `NiihauTrie` with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration for the trie.
    pub fn with_config(config: NiihauTrieConfig) -> Self {
        Self {
            nodes: vec![TrieNode::root()],
            free: Vec::new(),
            word_count: 0,
            config,
        }
    }

    /// Returns the configuration the trie was built with.
    pub fn config(&self) -> &NiihauTrieConfig {
        &self.config
    }

    /// Inserts a word into the trie.
    ///
    /// Under [`DuplicatePolicy::Set`] adding a word that is already stored
    /// changes nothing. The empty word is never stored.
    ///
    /// # Arguments
    ///
    /// * `word` - The word to insert.
    ///
    /// # Returns
    ///
    /// `true` if the word was stored, `false` if nothing changed.
    pub fn add<W: AsRef<str>>(&mut self, word: W) -> bool {
        let key = self.preprocess(word.as_ref());
        if key.is_empty() {
            return false;
        }

        if self.config.duplicate_policy == DuplicatePolicy::Set && self.contains_key(&key) {
            tracing::debug!(word = %key, "Word already stored, skipping insertion");
            return false;
        }

        let mut current = ROOT_ID;
        for c in key.chars() {
            let next = match self.node(current).child(c) {
                Some(child) => child,
                None => {
                    let child = self.allocate(c, current);
                    self.node_mut(current).children.insert(c, child);
                    child
                }
            };
            self.node_mut(next).subtree_count += 1;
            current = next;
        }

        self.node_mut(current).terminal_count += 1;
        self.node_mut(ROOT_ID).subtree_count += 1;
        self.word_count += 1;
        true
    }

    /// Returns `true` if the exact word is stored.
    ///
    /// A word that only occurs as the prefix of stored words is not contained.
    pub fn contains<W: AsRef<str>>(&self, word: W) -> bool {
        let key = self.preprocess(word.as_ref());
        self.contains_key(&key)
    }

    /// Returns `true` if at least one stored word starts with `prefix`.
    ///
    /// The empty prefix matches whenever the trie is non-empty.
    pub fn contains_prefix<P: AsRef<str>>(&self, prefix: P) -> bool {
        self.count_with_prefix(prefix) > 0
    }

    /// Returns the number of stored words starting with `prefix`.
    ///
    /// Reads the count kept on the prefix's last node, so the cost depends only
    /// on the prefix length. Returns `0` if no stored word has the prefix.
    pub fn count_with_prefix<P: AsRef<str>>(&self, prefix: P) -> usize {
        let key = self.preprocess(prefix.as_ref());
        self.find_node(&key)
            .map_or(0, |id| self.node(id).subtree_count)
    }

    /// Removes a word from the trie.
    ///
    /// Walks from the word's last node up to the root, decrementing the count
    /// of every node on the way and detaching each node whose count reaches
    /// zero. A word that is not stored leaves the trie untouched.
    ///
    /// Under [`DuplicatePolicy::Multiset`] one occurrence is removed.
    ///
    /// # Returns
    ///
    /// `true` if the word was removed, `false` if it wasn't found.
    pub fn remove<W: AsRef<str>>(&mut self, word: W) -> bool {
        let key = self.preprocess(word.as_ref());
        let terminal = match self.find_node(&key) {
            Some(id) if self.node(id).is_leaf() => id,
            _ => return false,
        };

        self.node_mut(terminal).terminal_count -= 1;

        let mut current = terminal;
        let mut pruned = 0usize;
        while !self.node(current).is_root {
            let node = self.node_mut(current);
            node.subtree_count -= 1;
            let symbol = node.symbol;
            let remaining = node.subtree_count;
            let Some(parent) = node.parent else {
                break;
            };

            if remaining == 0 {
                self.node_mut(parent).children.remove(&symbol);
                self.release(current);
                pruned += 1;
            }
            current = parent;
        }

        self.node_mut(ROOT_ID).subtree_count -= 1;
        self.word_count -= 1;

        if pruned > 0 {
            tracing::debug!(word = %key, pruned, "Pruned nodes after removal");
        }
        true
    }

    /// Lazily enumerates every stored word starting with `prefix`.
    ///
    /// Words come out in ascending character order. Under
    /// [`DuplicatePolicy::Multiset`] a word is yielded once per stored
    /// occurrence. An unknown prefix yields an empty iterator.
    pub fn words_with_prefix<P: AsRef<str>>(&self, prefix: P) -> WordsWithPrefix<'_> {
        let key = self.preprocess(prefix.as_ref());
        match self.find_node(&key) {
            Some(start) => WordsWithPrefix::new(self, start, key.chars().collect()),
            None => WordsWithPrefix::empty(self),
        }
    }

    /// Lazily enumerates every stored word.
    pub fn iter(&self) -> WordsWithPrefix<'_> {
        WordsWithPrefix::new(self, ROOT_ID, Vec::new())
    }

    /// Returns the number of stored words.
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Returns `true` if no word is stored.
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Returns the number of live nodes, not counting the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len() - 1
    }

    /// Removes every word, leaving only the root.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(TrieNode::root());
        self.free.clear();
        self.word_count = 0;
    }

    /// Renders the node structure, one node per line in depth-first order.
    ///
    /// Each line shows the node's symbol, its subtree count and its parent's
    /// symbol (`^` for the root), indented by depth. Nodes ending a stored
    /// word are marked with `*`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut stack: Vec<(NodeId, usize)> = self
            .node(ROOT_ID)
            .children
            .values()
            .rev()
            .map(|&child| (child, 0))
            .collect();

        while let Some((id, depth)) = stack.pop() {
            let node = self.node(id);
            let parent_symbol = match node.parent {
                Some(parent) if !self.node(parent).is_root => self.node(parent).symbol,
                _ => '^',
            };
            out.push_str(&format!(
                "{:indent$}({}:{}:{})",
                "",
                node.symbol,
                node.subtree_count,
                parent_symbol,
                indent = depth * 2
            ));
            if node.is_leaf() {
                out.push_str(" *");
            }
            out.push('\n');

            stack.extend(node.children.values().rev().map(|&child| (child, depth + 1)));
        }
        out
    }

    /// Applies encoding normalization and, for case-insensitive tries,
    /// lower-casing.
    fn preprocess<'a>(&self, word: &'a str) -> Cow<'a, str> {
        let normalized = self.config.encoding.normalize(word);
        if self.config.case_sensitive {
            normalized
        } else {
            Cow::Owned(normalized.to_lowercase())
        }
    }

    /// Membership test on an already preprocessed key.
    fn contains_key(&self, key: &str) -> bool {
        self.find_node(key)
            .is_some_and(|id| self.node(id).is_leaf())
    }

    /// Follows `key` from the root without creating nodes.
    ///
    /// The empty key resolves to the root.
    fn find_node(&self, key: &str) -> Option<NodeId> {
        key.chars()
            .try_fold(ROOT_ID, |current, c| self.node(current).child(c))
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id as usize]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut TrieNode {
        &mut self.nodes[id as usize]
    }

    /// Places a fresh node in a free slot, or at the end of the arena.
    fn allocate(&mut self, symbol: char, parent: NodeId) -> NodeId {
        let node = TrieNode::new(symbol, parent);
        match self.free.pop() {
            Some(id) => {
                self.nodes[id as usize] = node;
                id
            }
            None => {
                let id = NodeId::try_from(self.nodes.len())
                    .unwrap_or_else(|_| panic!("Niihau trie exceeded {} nodes", NodeId::MAX));
                self.nodes.push(node);
                id
            }
        }
    }

    /// Returns a detached slot to the free list.
    fn release(&mut self, id: NodeId) {
        let slot = self.node_mut(id);
        slot.children.clear();
        slot.parent = None;
        slot.subtree_count = 0;
        slot.terminal_count = 0;
        self.free.push(id);
    }
}

impl Default for NiihauTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AsRef<str>> Extend<S> for NiihauTrie {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.add(word);
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for NiihauTrie {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

impl<'a> IntoIterator for &'a NiihauTrie {
    type Item = String;
    type IntoIter = WordsWithPrefix<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
