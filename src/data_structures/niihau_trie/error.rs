//! Error types for the Niihau Trie.
//!
//! Trie queries never fail: a missing word or prefix is reported through a
//! sentinel (`false`, `0`, an empty iterator, `None`). The errors below only
//! arise while building a trie configuration from text.

/// Errors that can occur in Niihau Trie operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum NiihauTrieError {
    /// Error when a text encoding label cannot be resolved.
    #[error("Unknown text encoding label: '{0}'")]
    UnknownEncoding(String),

    /// Error when a duplicate policy name cannot be parsed.
    #[error("Unknown duplicate policy: '{0}' (expected 'set' or 'multiset')")]
    UnknownDuplicatePolicy(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NiihauTrieError::UnknownEncoding("klingon".to_string());
        assert_eq!(err.to_string(), "Unknown text encoding label: 'klingon'");

        let err = NiihauTrieError::UnknownDuplicatePolicy("bag".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown duplicate policy: 'bag' (expected 'set' or 'multiset')"
        );
    }
}
