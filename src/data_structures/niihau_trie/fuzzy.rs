//! Approximate search by Levenshtein distance.
//!
//! Instead of comparing the query against every stored word, the search walks
//! the trie once and carries one row of the edit-distance table per visited
//! node: the row for a node is derived from its parent's row and the node's
//! symbol, so words sharing a prefix share the work for that prefix. A branch
//! is abandoned as soon as every entry of its row exceeds the bound, because
//! extending the path can only keep or raise those distances.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::node::{NodeId, ROOT_ID};
use super::NiihauTrie;

/// A stored word and its edit distance to a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FuzzyMatch {
    /// The stored word
    pub word: String,

    /// Levenshtein distance between the query and `word`
    pub distance: usize,
}

/// Computes the Levenshtein distance between two strings, counting
/// insertions, deletions and substitutions of single `char`s.
///
/// # Example
///
/// ```
/// use niihau_lib::data_structures::niihau_trie::levenshtein_distance;
///
/// assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
/// assert_eq!(levenshtein_distance("", "abc"), 3);
/// ```
pub fn levenshtein_distance(source: &str, target: &str) -> usize {
    let target: Vec<char> = target.chars().collect();
    let mut row: Vec<usize> = (0..=target.len()).collect();
    for c in source.chars() {
        row = next_row(&row, &target, c);
    }
    row[target.len()]
}

/// Derives the row for a path extended by `symbol` from the row of the path
/// without it.
fn next_row(previous: &[usize], target: &[char], symbol: char) -> Vec<usize> {
    let mut row = Vec::with_capacity(previous.len());
    row.push(previous[0] + 1);

    for (i, &expected) in target.iter().enumerate() {
        let insert_cost = row[i] + 1;
        let delete_cost = previous[i + 1] + 1;
        let replace_cost = previous[i] + usize::from(expected != symbol);
        row.push(insert_cost.min(delete_cost).min(replace_cost));
    }
    row
}

impl NiihauTrie {
    /// Finds every stored word within `max_distance` edits of `word`.
    ///
    /// # Arguments
    ///
    /// * `word` - The query, normalized like any other input.
    /// * `max_distance` - Largest accepted Levenshtein distance.
    ///
    /// # Returns
    ///
    /// A map from each matching word to its distance.
    pub fn similar_within<W: AsRef<str>>(&self, word: W, max_distance: usize) -> HashMap<String, usize> {
        self.fuzzy_matches(word, max_distance)
            .into_iter()
            .map(|m| (m.word, m.distance))
            .collect()
    }

    /// Returns the stored word closest to `word`, if any lies within
    /// `max_distance`.
    ///
    /// Ties go to the word met first in traversal order, which is the
    /// smallest in character order.
    pub fn most_similar<W: AsRef<str>>(&self, word: W, max_distance: usize) -> Option<FuzzyMatch> {
        self.fuzzy_matches(word, max_distance)
            .into_iter()
            .reduce(|best, candidate| {
                if candidate.distance < best.distance {
                    candidate
                } else {
                    best
                }
            })
    }

    /// Finds every stored word within `max_distance` edits of `word`, in
    /// ascending character order.
    pub fn fuzzy_matches<W: AsRef<str>>(&self, word: W, max_distance: usize) -> Vec<FuzzyMatch> {
        let key = self.preprocess(word.as_ref());
        let target: Vec<char> = key.chars().collect();
        let last = target.len();

        let mut matches = Vec::new();
        // rows[d] belongs to the path of length d currently being explored
        let mut rows: Vec<Vec<usize>> = vec![(0..=last).collect()];
        let mut path: Vec<char> = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = self
            .node(ROOT_ID)
            .children
            .values()
            .rev()
            .map(|&child| (child, 0))
            .collect();
        let mut visited = 0usize;

        while let Some((id, depth)) = stack.pop() {
            visited += 1;
            rows.truncate(depth + 1);
            path.truncate(depth);

            let node = self.node(id);
            path.push(node.symbol);
            let row = next_row(&rows[depth], &target, node.symbol);

            if row[last] <= max_distance && node.is_leaf() {
                matches.push(FuzzyMatch {
                    word: path.iter().collect(),
                    distance: row[last],
                });
            }

            let best_in_row = row.iter().copied().min().unwrap_or(usize::MAX);
            if best_in_row <= max_distance {
                stack.extend(node.children.values().rev().map(|&child| (child, depth + 1)));
            }
            rows.push(row);
        }

        tracing::trace!(
            query = %key,
            max_distance,
            visited,
            matches = matches.len(),
            "Fuzzy search finished"
        );
        matches
    }
}
