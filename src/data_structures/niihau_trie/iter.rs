//! Lazy prefix enumeration.
//!
//! The walk keeps all of its state (pending nodes and the characters of the
//! current path) in the iterator, so any number of enumerations can run over
//! the same trie without touching node state.

use std::iter::FusedIterator;

use super::node::NodeId;
use super::NiihauTrie;

/// Iterator over the stored words sharing a prefix.
///
/// Created by [`NiihauTrie::words_with_prefix`] and [`NiihauTrie::iter`].
/// Performs a pre-order depth-first walk with children visited in ascending
/// character order, so words come out sorted by `char` sequence.
#[derive(Debug, Clone)]
pub struct WordsWithPrefix<'a> {
    trie: &'a NiihauTrie,

    /// Nodes still to visit, with the path length of their parent
    stack: Vec<(NodeId, usize)>,

    /// Characters from the root to the node visited last
    path: Vec<char>,

    /// Word waiting to be yielded, with its remaining number of occurrences
    pending: Option<(String, usize)>,
}

impl<'a> WordsWithPrefix<'a> {
    /// Starts a walk at `start`, whose root-to-node characters are `prefix`.
    pub(crate) fn new(trie: &'a NiihauTrie, start: NodeId, prefix: Vec<char>) -> Self {
        let mut iter = Self {
            trie,
            stack: Vec::new(),
            path: prefix,
            pending: None,
        };

        let node = trie.node(start);
        if node.is_leaf() {
            iter.pending = Some((iter.path.iter().collect(), node.terminal_count));
        }
        iter.push_children(start, iter.path.len());
        iter
    }

    /// An iterator that yields nothing.
    pub(crate) fn empty(trie: &'a NiihauTrie) -> Self {
        Self {
            trie,
            stack: Vec::new(),
            path: Vec::new(),
            pending: None,
        }
    }

    fn push_children(&mut self, id: NodeId, depth: usize) {
        let trie = self.trie;
        // reversed so the smallest character is popped first
        self.stack
            .extend(trie.node(id).children.values().rev().map(|&child| (child, depth)));
    }
}

impl Iterator for WordsWithPrefix<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some((word, remaining)) = self.pending.take() {
                if remaining > 1 {
                    self.pending = Some((word.clone(), remaining - 1));
                }
                return Some(word);
            }

            let (id, depth) = self.stack.pop()?;
            let trie = self.trie;
            let node = trie.node(id);

            self.path.truncate(depth);
            self.path.push(node.symbol);
            self.push_children(id, depth + 1);

            if node.is_leaf() {
                self.pending = Some((self.path.iter().collect(), node.terminal_count));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.pending.as_ref().map_or(0, |(_, remaining)| *remaining);
        if self.stack.is_empty() {
            (pending, Some(pending))
        } else {
            (pending, None)
        }
    }
}

impl FusedIterator for WordsWithPrefix<'_> {}

#[cfg(test)]
mod tests {
    use super::super::NiihauTrie;

    #[test]
    fn test_words_in_character_order() {
        let trie: NiihauTrie = ["b", "abc", "a", "ab", "ba"].into_iter().collect();
        let words: Vec<String> = trie.iter().collect();
        assert_eq!(words, ["a", "ab", "abc", "b", "ba"]);
    }

    #[test]
    fn test_prefix_is_included_when_stored() {
        let trie: NiihauTrie = ["John", "Johny", "Joe"].into_iter().collect();
        let words: Vec<String> = trie.words_with_prefix("John").collect();
        assert_eq!(words, ["John", "Johny"]);
    }

    #[test]
    fn test_unknown_prefix_is_empty_and_fused() {
        let trie: NiihauTrie = ["abc"].into_iter().collect();
        let mut words = trie.words_with_prefix("abd");
        assert_eq!(words.size_hint(), (0, Some(0)));
        assert_eq!(words.next(), None);
        assert_eq!(words.next(), None);
    }

    #[test]
    fn test_enumerations_are_independent() {
        let trie: NiihauTrie = ["one", "two", "three"].into_iter().collect();
        let mut first = trie.iter();
        let mut second = trie.iter();

        assert_eq!(first.next().as_deref(), Some("one"));
        assert_eq!(second.next().as_deref(), Some("one"));
        assert_eq!(first.collect::<Vec<_>>(), ["three", "two"]);
        assert_eq!(second.clone().count(), 2);
        assert_eq!(trie.iter().count(), 3);
    }

    #[test]
    fn test_multibyte_paths() {
        let trie: NiihauTrie = ["日本", "日本語", "日曜"].into_iter().collect();
        let words: Vec<String> = trie.words_with_prefix("日").collect();
        assert_eq!(words, ["日曜", "日本", "日本語"]);
    }
}
