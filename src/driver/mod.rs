// Copyright (c) 2025 Niihau Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! Thin drivers feeding text into a [`NiihauTrie`](crate::data_structures::niihau_trie::NiihauTrie).
//!
//! Two entry points are provided:
//! - [`CommandExecutor`] runs scripts of `command word` lines and reports one
//!   outcome per line, as text or JSON.
//! - [`load_corpus`] adds every token of a text source and [`probe`] times
//!   each query kind for a single word.

mod command;
mod corpus;
mod executor;

pub use command::Command;
pub use corpus::{load_corpus, probe, CorpusStats, ProbeReport, TimedStep};
pub use executor::{CommandExecutor, CommandOutcome, ScriptSummary};
