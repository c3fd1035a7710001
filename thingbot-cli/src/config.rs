//! The bot's TOML configuration file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thingbot_facets::{FacetsConfig, TwitterConfig};
use thingbot_storage::StoreConfig;
use tracing::{info, warn};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "thingbot.toml";

/// Everything `thingbot.toml` can set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub twitter: TwitterConfig,
}

impl BotConfig {
    /// Loads the config at `path`.
    ///
    /// A missing, unreadable or malformed file yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<BotConfig>(&contents) {
                Ok(config) => {
                    info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config file {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn facets(&self) -> FacetsConfig {
        FacetsConfig {
            twitter: self.twitter.clone(),
        }
    }
}
