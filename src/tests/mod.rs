//! Crate-internal test suites.
//!
//! Unit tests live next to the code they exercise. The suites here cover
//! behavior that spans modules:
//! - Configuration loading from files and the environment
//! - Error display and the global reporter
//! - Property-based checks of the trie's counting and search invariants

pub mod config_tests;

pub use test_utils::{create_test_dir, prefix_strategy, word_list_strategy, word_strategy};
