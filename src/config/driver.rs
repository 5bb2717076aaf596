//! Driver configuration module.
//!
//! This module defines how the command-script driver reports outcomes and
//! reacts to malformed lines.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Largest edit distance the driver accepts as a default bound.
pub const MAX_DEFAULT_DISTANCE: usize = 32;

/// Rendering of command outcomes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per command
    #[default]
    Text,
    /// One JSON object per command
    Json,
}

/// Driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// How outcomes are written
    pub output: OutputFormat,

    /// Whether to log and skip malformed lines instead of aborting the script
    pub keep_going: bool,

    /// Distance bound used by `similar` and `closest` when a line omits one
    pub default_max_distance: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::default(),
            keep_going: false,
            default_max_distance: 2,
        }
    }
}

impl Validate for DriverConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.default_max_distance > MAX_DEFAULT_DISTANCE {
            return Err(ConfigError::ValueOutOfRange {
                key: "driver.default_max_distance".to_string(),
                message: format!(
                    "{} exceeds the maximum of {MAX_DEFAULT_DISTANCE}",
                    self.default_max_distance
                ),
            });
        }
        Ok(())
    }
}
