//! Store configuration, the `[store]` table of the bot's TOML config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_path() -> PathBuf {
    PathBuf::from("things.json")
}

fn default_autosave() -> bool {
    true
}

/// Where the store lives and when it is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backing JSON document.
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Save after every mutating command.
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            autosave: default_autosave(),
        }
    }
}
