//! Config schema - Configuration for docket

use serde::{Deserialize, Serialize};

/// Main configuration for docket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Longest note (in characters) kept in an audit record
    #[serde(default = "default_note_max_chars")]
    pub note_max_chars: usize,

    /// Actors allowed to change any case regardless of assignment
    #[serde(default)]
    pub admins: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_note_max_chars() -> usize {
    4000
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: 1,
            note_max_chars: 4000,
            admins: Vec::new(),
        }
    }
}
