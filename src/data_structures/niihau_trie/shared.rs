//! Thread-safe handle around a [`NiihauTrie`].
//!
//! The trie mutates its nodes in place, so a reader running during a removal
//! could observe a half-pruned branch. The handle guards the whole trie with a
//! single reader-writer lock: `add`, `remove` and `clear` take it exclusively,
//! every query takes it shared.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{FuzzyMatch, NiihauTrie, NiihauTrieConfig};

/// A cloneable, lock-protected [`NiihauTrie`].
///
/// Clones share the same trie.
#[derive(Debug, Clone, Default)]
pub struct SharedNiihauTrie {
    inner: Arc<RwLock<NiihauTrie>>,
}

impl SharedNiihauTrie {
    /// Creates a handle around an empty trie with default configuration.
    pub fn new() -> Self {
        Self::from_trie(NiihauTrie::new())
    }

    /// Creates a handle around an empty trie with the given configuration.
    pub fn with_config(config: NiihauTrieConfig) -> Self {
        Self::from_trie(NiihauTrie::with_config(config))
    }

    /// Wraps an existing trie.
    pub fn from_trie(trie: NiihauTrie) -> Self {
        Self {
            inner: Arc::new(RwLock::new(trie)),
        }
    }

    /// Acquires shared access for a batch of queries.
    pub fn read(&self) -> RwLockReadGuard<'_, NiihauTrie> {
        self.inner.read()
    }

    /// Acquires exclusive access for a batch of updates.
    pub fn write(&self) -> RwLockWriteGuard<'_, NiihauTrie> {
        self.inner.write()
    }

    /// See [`NiihauTrie::add`].
    pub fn add<W: AsRef<str>>(&self, word: W) -> bool {
        self.inner.write().add(word)
    }

    /// See [`NiihauTrie::remove`].
    pub fn remove<W: AsRef<str>>(&self, word: W) -> bool {
        self.inner.write().remove(word)
    }

    /// See [`NiihauTrie::clear`].
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// See [`NiihauTrie::contains`].
    pub fn contains<W: AsRef<str>>(&self, word: W) -> bool {
        self.inner.read().contains(word)
    }

    /// See [`NiihauTrie::contains_prefix`].
    pub fn contains_prefix<P: AsRef<str>>(&self, prefix: P) -> bool {
        self.inner.read().contains_prefix(prefix)
    }

    /// See [`NiihauTrie::count_with_prefix`].
    pub fn count_with_prefix<P: AsRef<str>>(&self, prefix: P) -> usize {
        self.inner.read().count_with_prefix(prefix)
    }

    /// Collects the words starting with `prefix` while holding the read lock.
    pub fn words_with_prefix<P: AsRef<str>>(&self, prefix: P) -> Vec<String> {
        self.inner.read().words_with_prefix(prefix).collect()
    }

    /// See [`NiihauTrie::similar_within`].
    pub fn similar_within<W: AsRef<str>>(&self, word: W, max_distance: usize) -> HashMap<String, usize> {
        self.inner.read().similar_within(word, max_distance)
    }

    /// See [`NiihauTrie::most_similar`].
    pub fn most_similar<W: AsRef<str>>(&self, word: W, max_distance: usize) -> Option<FuzzyMatch> {
        self.inner.read().most_similar(word, max_distance)
    }

    /// See [`NiihauTrie::len`].
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// See [`NiihauTrie::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
