//! Data structures for the Niihau trie toolkit.
//!
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - No I/O inside data structures
//! - Read-only queries never mutate shared state

pub mod niihau_trie;

// Re-export common data structures
pub use niihau_trie::{NiihauTrie, NiihauTrieConfig, NiihauTrieError, NiihauTrieResult};
