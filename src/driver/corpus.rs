// Copyright (c) 2025 Niihau Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! Bulk loading of text corpora and timed probes.
//!
//! A corpus is any text: every whitespace-separated token becomes a word.
//! After loading, [`probe`] times each trie operation for one query word,
//! which is how large dictionaries are sanity-checked from the command line.

use std::io::BufRead;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::data_structures::niihau_trie::NiihauTrie;
use crate::error::NiihauResult;

/// Statistics of a corpus load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorpusStats {
    /// Tokens read from the corpus
    pub tokens: usize,
    /// Tokens that changed the trie
    pub stored: usize,
    /// Words in the trie after loading
    pub words: usize,
    /// Live nodes after loading, root excluded
    pub nodes: usize,
    /// Wall-clock load time in milliseconds
    pub elapsed_ms: f64,
}

/// Adds every whitespace-separated token of `reader` to `trie`.
///
/// # Errors
///
/// Returns `NiihauError::Io` if reading fails. Tokens added before the
/// failure stay in the trie.
pub fn load_corpus<R: BufRead>(trie: &mut NiihauTrie, reader: R) -> NiihauResult<CorpusStats> {
    let start = Instant::now();
    let mut tokens = 0usize;
    let mut stored = 0usize;

    for line in reader.lines() {
        let line = line?;
        for token in line.split_whitespace() {
            tokens += 1;
            if trie.add(token) {
                stored += 1;
            }
        }
    }

    let stats = CorpusStats {
        tokens,
        stored,
        words: trie.len(),
        nodes: trie.node_count(),
        elapsed_ms: millis(start.elapsed()),
    };
    tracing::info!(
        tokens = stats.tokens,
        stored = stats.stored,
        words = stats.words,
        nodes = stats.nodes,
        elapsed_ms = stats.elapsed_ms,
        "Corpus loaded"
    );
    Ok(stats)
}

/// One timed trie operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedStep<T> {
    /// The operation's result
    pub result: T,
    /// Wall-clock time in milliseconds
    pub elapsed_ms: f64,
}

/// Timings of every query kind for one word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeReport {
    /// The probed word
    pub word: String,
    /// Bound used for the similarity step
    pub max_distance: usize,
    /// `count_with_prefix(word)`
    pub count: TimedStep<usize>,
    /// Number of words yielded by `words_with_prefix(word)`
    pub enumerated: TimedStep<usize>,
    /// Number of words returned by `similar_within(word, max_distance)`
    pub similar: TimedStep<usize>,
    /// `remove(word)`
    pub removed: TimedStep<bool>,
    /// Words left after the removal
    pub words_after: usize,
}

/// Times count, enumeration, similarity search and removal of `word`.
///
/// The removal is real: `word` is no longer stored afterwards.
pub fn probe(trie: &mut NiihauTrie, word: &str, max_distance: usize) -> ProbeReport {
    let count = timed(|| trie.count_with_prefix(word));
    let enumerated = timed(|| trie.words_with_prefix(word).count());
    let similar = timed(|| trie.similar_within(word, max_distance).len());
    let removed = timed(|| trie.remove(word));

    let report = ProbeReport {
        word: word.to_string(),
        max_distance,
        count,
        enumerated,
        similar,
        removed,
        words_after: trie.len(),
    };
    tracing::info!(
        word,
        count = report.count.result,
        count_ms = report.count.elapsed_ms,
        enumerated = report.enumerated.result,
        enumerate_ms = report.enumerated.elapsed_ms,
        similar = report.similar.result,
        similar_ms = report.similar.elapsed_ms,
        removed = report.removed.result,
        remove_ms = report.removed.elapsed_ms,
        "Probe finished"
    );
    report
}

fn timed<T>(f: impl FnOnce() -> T) -> TimedStep<T> {
    let start = Instant::now();
    let result = f();
    TimedStep {
        result,
        elapsed_ms: millis(start.elapsed()),
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}
