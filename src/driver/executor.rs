// Copyright (c) 2025 Niihau Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! Command execution against a trie.
//!
//! The executor owns a [`NiihauTrie`] and turns each [`Command`] into a
//! [`CommandOutcome`], which can be rendered as text or serialized as a JSON
//! object. Whole scripts are run with [`CommandExecutor::run_script`].

use std::fmt;
use std::io::{BufRead, Write};

use serde::Serialize;

use super::command::Command;
use crate::config::driver::{DriverConfig, OutputFormat};
use crate::config::get_global_config;
use crate::data_structures::niihau_trie::{FuzzyMatch, NiihauTrie};
use crate::error::{get_error_reporting, ErrorContext, NiihauError, NiihauResult};

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum CommandOutcome {
    /// Outcome of `add`
    Add {
        /// Word as given in the script
        word: String,
        /// Whether the trie changed
        added: bool,
    },
    /// Outcome of `contains`
    Contains {
        /// Word as given in the script
        word: String,
        /// Whether the word is stored
        found: bool,
    },
    /// Outcome of `prefix`
    Prefix {
        /// Prefix as given in the script
        prefix: String,
        /// Whether any stored word has the prefix
        found: bool,
    },
    /// Outcome of `count`
    Count {
        /// Prefix as given in the script
        prefix: String,
        /// Number of stored words with the prefix
        count: usize,
    },
    /// Outcome of `remove`
    Remove {
        /// Word as given in the script
        word: String,
        /// Whether the word was stored and is now gone
        removed: bool,
    },
    /// Outcome of `words`
    Words {
        /// Prefix as given in the script
        prefix: String,
        /// Stored words with the prefix, in character order
        words: Vec<String>,
    },
    /// Outcome of `similar`
    Similar {
        /// Query word
        word: String,
        /// Bound actually applied
        max_distance: usize,
        /// Matches in character order
        matches: Vec<FuzzyMatch>,
    },
    /// Outcome of `closest`
    Closest {
        /// Query word
        word: String,
        /// Bound actually applied
        max_distance: usize,
        /// Closest stored word, if any is within the bound
        best: Option<FuzzyMatch>,
    },
    /// Outcome of `size`
    Size {
        /// Number of stored words
        words: usize,
        /// Number of live nodes, not counting the root
        nodes: usize,
    },
    /// Outcome of `show`
    Show {
        /// Structural dump of the trie
        rendering: String,
    },
    /// Outcome of `clear`
    Clear,
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutcome::Add { word, added } => write!(f, "add {word}: {added}"),
            CommandOutcome::Contains { word, found } => write!(f, "contains {word}: {found}"),
            CommandOutcome::Prefix { prefix, found } => write!(f, "prefix {prefix}: {found}"),
            CommandOutcome::Count { prefix, count } => write!(f, "count {prefix}: {count}"),
            CommandOutcome::Remove { word, removed } => write!(f, "remove {word}: {removed}"),
            CommandOutcome::Words { prefix, words } => {
                write!(f, "words {prefix}: [{}]", words.join(", "))
            }
            CommandOutcome::Similar { word, max_distance, matches } => {
                write!(f, "similar {word} {max_distance}: [")?;
                for (i, m) in matches.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", m.word, m.distance)?;
                }
                f.write_str("]")
            }
            CommandOutcome::Closest { word, max_distance, best } => match best {
                Some(m) => write!(f, "closest {word} {max_distance}: {}={}", m.word, m.distance),
                None => write!(f, "closest {word} {max_distance}: none"),
            },
            CommandOutcome::Size { words, nodes } => write!(f, "size: {words} words, {nodes} nodes"),
            CommandOutcome::Show { rendering } => f.write_str(rendering.trim_end()),
            CommandOutcome::Clear => f.write_str("clear: ok"),
        }
    }
}

/// Counters reported after a script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScriptSummary {
    /// Commands executed
    pub executed: usize,
    /// Malformed lines skipped under `keep_going`
    pub skipped: usize,
}

/// Executes driver commands against an owned trie.
#[derive(Debug)]
pub struct CommandExecutor {
    trie: NiihauTrie,
    config: DriverConfig,
}

impl CommandExecutor {
    /// Creates an executor over `trie`.
    pub fn new(trie: NiihauTrie, config: DriverConfig) -> Self {
        Self { trie, config }
    }

    /// Creates an executor over an empty trie, both configured from the
    /// global configuration.
    pub fn from_global_config() -> Self {
        let global = get_global_config();
        let config = global.get();
        Self::new(NiihauTrie::with_config(config.trie), config.driver.clone())
    }

    /// The trie commands run against.
    pub fn trie(&self) -> &NiihauTrie {
        &self.trie
    }

    /// Consumes the executor, returning its trie.
    pub fn into_trie(self) -> NiihauTrie {
        self.trie
    }

    /// Executes a single command.
    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        tracing::debug!(%command, "Executing command");
        match command {
            Command::Add(word) => {
                let added = self.trie.add(&word);
                CommandOutcome::Add { word, added }
            }
            Command::Contains(word) => {
                let found = self.trie.contains(&word);
                CommandOutcome::Contains { word, found }
            }
            Command::Prefix(prefix) => {
                let found = self.trie.contains_prefix(&prefix);
                CommandOutcome::Prefix { prefix, found }
            }
            Command::Count(prefix) => {
                let count = self.trie.count_with_prefix(&prefix);
                CommandOutcome::Count { prefix, count }
            }
            Command::Remove(word) => {
                let removed = self.trie.remove(&word);
                CommandOutcome::Remove { word, removed }
            }
            Command::Words(prefix) => {
                let words = self.trie.words_with_prefix(&prefix).collect();
                CommandOutcome::Words { prefix, words }
            }
            Command::Similar { word, max_distance } => {
                let max_distance = max_distance.unwrap_or(self.config.default_max_distance);
                let matches = self.trie.fuzzy_matches(&word, max_distance);
                CommandOutcome::Similar { word, max_distance, matches }
            }
            Command::Closest { word, max_distance } => {
                let max_distance = max_distance.unwrap_or(self.config.default_max_distance);
                let best = self.trie.most_similar(&word, max_distance);
                CommandOutcome::Closest { word, max_distance, best }
            }
            Command::Size => CommandOutcome::Size {
                words: self.trie.len(),
                nodes: self.trie.node_count(),
            },
            Command::Show => CommandOutcome::Show {
                rendering: self.trie.render(),
            },
            Command::Clear => {
                self.trie.clear();
                CommandOutcome::Clear
            }
        }
    }

    /// Runs every line of `reader` and writes one outcome per command to `writer`.
    ///
    /// # Errors
    ///
    /// * `NiihauError::Command` on the first malformed line, unless the
    ///   driver is configured to keep going
    /// * `NiihauError::Io` / `NiihauError::Serialization` if reading or
    ///   writing fails
    pub fn run_script<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        mut writer: W,
    ) -> NiihauResult<ScriptSummary> {
        let mut summary = ScriptSummary::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;

            let command = match Command::parse_line(&line, line_no) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) if self.config.keep_going => {
                    summary.skipped += 1;
                    tracing::warn!(line = line_no, "Skipping malformed command");
                    get_error_reporting().report(
                        ErrorContext::new(NiihauError::Command(e), "driver")
                            .with_details(format!("skipped line: {line}")),
                    );
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let outcome = self.execute(command);
            summary.executed += 1;
            self.write_outcome(&mut writer, &outcome)?;
        }

        writer.flush()?;
        tracing::info!(
            executed = summary.executed,
            skipped = summary.skipped,
            words = self.trie.len(),
            "Script finished"
        );
        Ok(summary)
    }

    fn write_outcome<W: Write>(&self, writer: &mut W, outcome: &CommandOutcome) -> NiihauResult<()> {
        match self.config.output {
            OutputFormat::Text => writeln!(writer, "{outcome}")?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *writer, outcome)?;
                writeln!(writer)?;
            }
        }
        Ok(())
    }
}
