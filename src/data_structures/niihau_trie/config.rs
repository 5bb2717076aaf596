//! Configuration for the Niihau Trie.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::encoding::TextEncoding;
use super::error::NiihauTrieError;
use super::NiihauTrieResult;

/// How `add` treats a word that is already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Adding a stored word is a no-op: counts and length are unchanged.
    #[default]
    Set,

    /// Every `add` is counted. `remove` takes away one occurrence and
    /// enumeration yields a word once per stored occurrence.
    Multiset,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Set => f.write_str("set"),
            DuplicatePolicy::Multiset => f.write_str("multiset"),
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = NiihauTrieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "set" => Ok(DuplicatePolicy::Set),
            "multiset" => Ok(DuplicatePolicy::Multiset),
            _ => Err(NiihauTrieError::UnknownDuplicatePolicy(s.to_string())),
        }
    }
}

/// Configuration options for the Niihau Trie.
///
/// All options are fixed when the trie is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NiihauTrieConfig {
    /// Whether keys keep their case. When false every key is lower-cased
    /// before storage or lookup.
    pub case_sensitive: bool,

    /// Encoding every input string is round-tripped through
    pub encoding: TextEncoding,

    /// Treatment of repeated insertions
    pub duplicate_policy: DuplicatePolicy,
}

impl NiihauTrieConfig {
    /// Create a new default configuration.
    ///
    /// Default values:
    /// - case_sensitive: true
    /// - encoding: UTF-8
    /// - duplicate_policy: Set
    pub fn new() -> Self {
        Self {
            case_sensitive: true,
            encoding: TextEncoding::utf8(),
            duplicate_policy: DuplicatePolicy::Set,
        }
    }

    /// Set whether keys are case sensitive.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Set the text encoding applied to every input string.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the text encoding from a label such as `"utf-8"` or `"latin1"`.
    ///
    /// # Errors
    ///
    /// Returns [`NiihauTrieError::UnknownEncoding`] if the label is not recognised.
    pub fn with_encoding_label(self, label: &str) -> NiihauTrieResult<Self> {
        Ok(self.with_encoding(TextEncoding::from_label(label)?))
    }

    /// Set how repeated insertions are counted.
    pub fn with_duplicate_policy(mut self, duplicate_policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = duplicate_policy;
        self
    }
}

impl Default for NiihauTrieConfig {
    fn default() -> Self {
        Self::new()
    }
}
