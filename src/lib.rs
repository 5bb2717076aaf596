//! Niihau Trie Library
//!
//! This library contains a counting prefix tree with pruning deletion and
//! Levenshtein fuzzy search, plus the configuration, error handling and
//! script drivers used by the `niihau` binary. The library is designed to be
//! used by the binary crate, but can also be used as a dependency by other
//! projects that only need the trie.
//!
//! # Architecture
//!
//! - [`data_structures::niihau_trie`] holds the trie. It performs no I/O and
//!   never fails on queries.
//! - [`driver`] feeds scripts and corpora into a trie.
//! - [`config`] and [`error`] provide the ambient plumbing shared by both.

pub mod config;
pub mod data_structures;
pub mod driver;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the Niihau trie toolkit.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Loads the configuration from `path` and `NIIHAU__*` environment variables.
///
/// # Errors
///
/// Returns `NiihauError::Config` if the file is missing, malformed or holds
/// invalid values.
pub fn load_config<P: AsRef<std::path::Path>>(
    path: Option<P>,
) -> error::NiihauResult<config::NiihauConfig> {
    let config = config::ConfigLoader::new(path, config::ENV_PREFIX).load()?;
    Ok(config)
}

/// Library initialization function.
///
/// Routes reported errors to `tracing` and installs `config` as the global
/// configuration.
pub fn init(config: config::NiihauConfig) {
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));
    config::init_global_config(config);
}
