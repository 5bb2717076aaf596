// Copyright (c) 2025 Niihau Authors
//
// Licensed under the MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)

//! Command-line parsing for driver scripts.
//!
//! A script is plain text with one command per line:
//!
//! ```text
//! # contacts
//! add John
//! count Jo
//! similar Jahn 1
//! ```
//!
//! Tokens are separated by whitespace. Blank lines and lines starting with `#`
//! are ignored.

use std::fmt;

use crate::error::command::CommandError;

/// A parsed driver command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <word>`
    Add(String),
    /// `contains <word>`
    Contains(String),
    /// `prefix <prefix>`: whether any stored word has the prefix
    Prefix(String),
    /// `count [prefix]`
    Count(String),
    /// `remove <word>`
    Remove(String),
    /// `words [prefix]`
    Words(String),
    /// `similar <word> [max_distance]`
    Similar {
        /// Query word
        word: String,
        /// Bound, or the configured default when absent
        max_distance: Option<usize>,
    },
    /// `closest <word> [max_distance]`
    Closest {
        /// Query word
        word: String,
        /// Bound, or the configured default when absent
        max_distance: Option<usize>,
    },
    /// `size`
    Size,
    /// `show`
    Show,
    /// `clear`
    Clear,
}

impl Command {
    /// Parses one script line.
    ///
    /// # Arguments
    ///
    /// * `line` - The raw line.
    /// * `line_no` - 1-based line number used in error messages.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` for blank and comment lines
    /// * `Ok(Some(command))` for a well-formed command
    /// * `Err(CommandError)` otherwise
    pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Command>, CommandError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let mut tokens = trimmed.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let mut args = Arguments {
            tokens,
            line: line_no,
            command: "",
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "add" => Command::Add(args.named("add").required("word")?),
            "contains" => Command::Contains(args.named("contains").required("word")?),
            "prefix" => Command::Prefix(args.named("prefix").required("prefix")?),
            "count" => Command::Count(args.named("count").optional()),
            "remove" => Command::Remove(args.named("remove").required("word")?),
            "words" => Command::Words(args.named("words").optional()),
            "similar" => {
                let word = args.named("similar").required("word")?;
                Command::Similar {
                    word,
                    max_distance: args.distance()?,
                }
            }
            "closest" => {
                let word = args.named("closest").required("word")?;
                Command::Closest {
                    word,
                    max_distance: args.distance()?,
                }
            }
            "size" => Command::Size,
            "show" => Command::Show,
            "clear" => Command::Clear,
            _ => {
                return Err(CommandError::UnknownCommand {
                    line: line_no,
                    command: name.to_string(),
                })
            }
        };

        args.finish()?;
        Ok(Some(command))
    }

    /// The keyword introducing this command in a script.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Add(_) => "add",
            Command::Contains(_) => "contains",
            Command::Prefix(_) => "prefix",
            Command::Count(_) => "count",
            Command::Remove(_) => "remove",
            Command::Words(_) => "words",
            Command::Similar { .. } => "similar",
            Command::Closest { .. } => "closest",
            Command::Size => "size",
            Command::Show => "show",
            Command::Clear => "clear",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Add(arg)
            | Command::Contains(arg)
            | Command::Prefix(arg)
            | Command::Remove(arg) => write!(f, "{} {arg}", self.name()),
            Command::Count(prefix) | Command::Words(prefix) if prefix.is_empty() => {
                f.write_str(self.name())
            }
            Command::Count(prefix) | Command::Words(prefix) => write!(f, "{} {prefix}", self.name()),
            Command::Similar { word, max_distance } | Command::Closest { word, max_distance } => {
                write!(f, "{} {word}", self.name())?;
                if let Some(d) = max_distance {
                    write!(f, " {d}")?;
                }
                Ok(())
            }
            Command::Size | Command::Show | Command::Clear => f.write_str(self.name()),
        }
    }
}

/// Remaining tokens of a line being parsed.
struct Arguments<'a> {
    tokens: std::str::SplitWhitespace<'a>,
    line: usize,
    command: &'static str,
}

impl Arguments<'_> {
    fn named(&mut self, command: &'static str) -> &mut Self {
        self.command = command;
        self
    }

    fn required(&mut self, argument: &'static str) -> Result<String, CommandError> {
        self.tokens
            .next()
            .map(str::to_string)
            .ok_or(CommandError::MissingArgument {
                line: self.line,
                command: self.command,
                argument,
            })
    }

    fn optional(&mut self) -> String {
        self.tokens.next().map(str::to_string).unwrap_or_default()
    }

    fn distance(&mut self) -> Result<Option<usize>, CommandError> {
        self.tokens
            .next()
            .map(|value| {
                value.parse().map_err(|_| CommandError::InvalidArgument {
                    line: self.line,
                    command: self.command,
                    argument: "max distance",
                    value: value.to_string(),
                })
            })
            .transpose()
    }

    fn finish(&mut self) -> Result<(), CommandError> {
        match self.tokens.next() {
            Some(value) => Err(CommandError::UnexpectedArgument {
                line: self.line,
                command: self.command,
                value: value.to_string(),
            }),
            None => Ok(()),
        }
    }
}
