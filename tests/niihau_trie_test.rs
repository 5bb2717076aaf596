// Copyright (c) 2025 Niihau Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! Integration tests for the Niihau Trie.
//! Drives the trie through the public API only, on the contact list and
//! repeated-letter workloads used throughout the crate documentation.

use std::collections::HashMap;
use std::sync::{Arc, Barrier};
use std::thread;

use niihau_lib::data_structures::niihau_trie::{
    DuplicatePolicy, FuzzyMatch, NiihauTrie, NiihauTrieConfig, SharedNiihauTrie,
};

fn contacts() -> NiihauTrie {
    let mut trie = NiihauTrie::new();
    for name in ["Joe", "John", "Johny", "Johnny", "Jane", "Jack"] {
        assert!(trie.add(name));
    }
    trie
}

#[test]
fn test_prefix_counts_on_contacts() {
    let trie = contacts();
    assert_eq!(trie.count_with_prefix("John"), 3);
    assert_eq!(trie.count_with_prefix("Ja"), 2);
    assert_eq!(trie.count_with_prefix("J"), 6);
    assert_eq!(trie.count_with_prefix("john"), 0);
    assert_eq!(trie.len(), 6);
}

#[test]
fn test_remove_updates_counts_and_enumeration() {
    let mut trie = contacts();
    assert!(trie.remove("Johnny"));

    assert_eq!(trie.count_with_prefix("John"), 2);
    let words: Vec<String> = trie.words_with_prefix("John").collect();
    assert_eq!(words, ["John", "Johny"]);
    assert!(!trie.contains("Johnny"));
    assert!(trie.contains_prefix("Johny"));
}

#[test]
fn test_nested_words_removed_one_by_one() {
    let mut trie = NiihauTrie::new();
    for word in ["s", "ss", "sss", "ssss", "sssss"] {
        trie.add(word);
    }
    assert_eq!(trie.count_with_prefix("s"), 5);

    assert!(trie.remove("s"));
    assert_eq!(trie.count_with_prefix("s"), 4);
    assert!(!trie.contains("s"));
    assert!(trie.contains("ss"));

    assert!(trie.remove("sss"));
    assert_eq!(trie.count_with_prefix("sss"), 2);
    assert!(trie.contains("ssss"));

    for word in ["ss", "ssss", "sssss"] {
        assert!(trie.remove(word));
    }
    assert_eq!(trie.len(), 0);
    assert_eq!(trie.node_count(), 0);
    assert!(!trie.contains_prefix("s"));
}

#[test]
fn test_similarity_search() {
    let mut trie = NiihauTrie::new();
    trie.extend(["china", "people", "chinese", "great", "wall", "ch"]);

    let near = trie.similar_within("chinaa", 1);
    assert_eq!(near.get("china"), Some(&1));

    let exact = trie.similar_within("china", 0);
    assert_eq!(exact, HashMap::from([("china".to_string(), 0)]));

    assert_eq!(
        trie.most_similar("chinaa", 3),
        Some(FuzzyMatch {
            word: "china".to_string(),
            distance: 1
        })
    );
}

#[test]
fn test_removing_missing_words_changes_nothing() {
    let mut trie = contacts();
    let before = trie.render();

    assert!(!trie.remove("Jo"));
    assert!(!trie.remove("Johnathan"));
    assert!(!trie.remove("Bob"));
    assert!(!trie.remove(""));

    assert_eq!(trie.render(), before);
    assert_eq!(trie.len(), 6);
}

#[test]
fn test_remove_everything_collapses_to_root() {
    let mut trie = contacts();
    let words: Vec<String> = trie.iter().collect();
    for word in &words {
        assert!(trie.remove(word));
    }

    assert!(trie.is_empty());
    assert_eq!(trie.node_count(), 0);
    assert_eq!(trie.iter().next(), None);
    assert!(trie.similar_within("Joe", 10).is_empty());

    // the emptied trie is fully reusable
    assert!(trie.add("Joe"));
    assert_eq!(trie.count_with_prefix(""), 1);
}

#[test]
fn test_configured_trie() {
    let config = NiihauTrieConfig::new()
        .with_case_sensitive(false)
        .with_encoding_label("latin1")
        .unwrap()
        .with_duplicate_policy(DuplicatePolicy::Multiset);
    let mut trie = NiihauTrie::with_config(config);

    trie.add("Café");
    trie.add("CAFÉ");
    trie.add("caf☕");

    assert_eq!(trie.count_with_prefix("caf"), 3);
    assert_eq!(trie.words_with_prefix("café").count(), 2);
    assert!(trie.contains("caf?"));
    assert!(trie.remove("café"));
    assert_eq!(trie.count_with_prefix("CAFÉ"), 1);
}

#[test]
fn test_shared_trie_across_threads() {
    const THREADS: usize = 4;
    let trie = SharedNiihauTrie::new();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let trie = trie.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..25 {
                    trie.add(format!("w{t}-{i}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(trie.len(), THREADS * 25);
    assert_eq!(trie.count_with_prefix("w0-"), 25);
    assert_eq!(trie.words_with_prefix("w3-2").len(), 6);
}
