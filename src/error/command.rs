//! Command error module.
//!
//! This module defines error types that may occur while parsing and executing
//! driver command scripts.

use thiserror::Error;

/// Errors that can occur while parsing a driver command line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Error when the first token of a line names no known command.
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand {
        /// 1-based line number in the script
        line: usize,
        /// The unrecognised command token
        command: String,
    },

    /// Error when a required argument is missing.
    #[error("line {line}: '{command}' requires {argument}")]
    MissingArgument {
        /// 1-based line number in the script
        line: usize,
        /// The command being parsed
        command: &'static str,
        /// Name of the missing argument
        argument: &'static str,
    },

    /// Error when an argument cannot be parsed.
    #[error("line {line}: invalid {argument} '{value}' for '{command}'")]
    InvalidArgument {
        /// 1-based line number in the script
        line: usize,
        /// The command being parsed
        command: &'static str,
        /// Name of the argument
        argument: &'static str,
        /// The rejected value
        value: String,
    },

    /// Error when a line carries more tokens than its command accepts.
    #[error("line {line}: unexpected argument '{value}' for '{command}'")]
    UnexpectedArgument {
        /// 1-based line number in the script
        line: usize,
        /// The command being parsed
        command: &'static str,
        /// The first surplus token
        value: String,
    },
}

impl CommandError {
    /// The script line the error refers to.
    pub fn line(&self) -> usize {
        match self {
            CommandError::UnknownCommand { line, .. }
            | CommandError::MissingArgument { line, .. }
            | CommandError::InvalidArgument { line, .. }
            | CommandError::UnexpectedArgument { line, .. } => *line,
        }
    }
}
