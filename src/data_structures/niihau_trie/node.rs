//! Node implementation for the Niihau Trie.
//!
//! This module provides the TrieNode structure used in the Niihau Trie implementation.
//! Nodes live in an arena owned by the trie and refer to each other by index:
//! a parent owns its children through the `children` map, while `parent` is a
//! plain back-reference used for upward walks.

use std::collections::BTreeMap;

/// Index of a node slot in the trie's arena.
pub(crate) type NodeId = u32;

/// Slot of the sentinel root. The root is allocated first and never freed.
pub(crate) const ROOT_ID: NodeId = 0;

/// A node in the Niihau Trie.
///
/// Each non-root node represents one character on the path of at least one
/// stored word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TrieNode {
    /// Edge label from the parent. Unused (`'\0'`) for the root.
    pub symbol: char,

    /// Number of stored words whose path passes through this node
    pub subtree_count: usize,

    /// Number of stored words ending exactly at this node
    pub terminal_count: usize,

    /// Whether this node is the sentinel root
    pub is_root: bool,

    /// Back-reference to the parent slot (`None` for the root)
    pub parent: Option<NodeId>,

    /// Map of characters to child slots, ordered by character
    pub children: BTreeMap<char, NodeId>,
}

impl TrieNode {
    /// Creates the sentinel root node.
    pub fn root() -> Self {
        Self {
            symbol: '\0',
            subtree_count: 0,
            terminal_count: 0,
            is_root: true,
            parent: None,
            children: BTreeMap::new(),
        }
    }

    /// Creates an empty node for `symbol` hanging under `parent`.
    pub fn new(symbol: char, parent: NodeId) -> Self {
        Self {
            symbol,
            subtree_count: 0,
            terminal_count: 0,
            is_root: false,
            parent: Some(parent),
            children: BTreeMap::new(),
        }
    }

    /// Whether at least one stored word terminates at this node.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.terminal_count > 0
    }

    /// Looks up the child slot for `symbol`.
    #[inline]
    pub fn child(&self, symbol: char) -> Option<NodeId> {
        self.children.get(&symbol).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_node() {
        let root = TrieNode::root();
        assert!(root.is_root);
        assert!(root.parent.is_none());
        assert!(!root.is_leaf());
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_child_node() {
        let mut node = TrieNode::new('a', ROOT_ID);
        assert!(!node.is_root);
        assert_eq!(node.parent, Some(ROOT_ID));
        assert!(!node.is_leaf());

        node.terminal_count = 1;
        assert!(node.is_leaf());

        node.children.insert('b', 7);
        assert_eq!(node.child('b'), Some(7));
        assert_eq!(node.child('c'), None);
    }
}
