//! Facet configuration, the `[twitter]` table of the bot's TOML config.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for all built-in facets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetsConfig {
    #[serde(default)]
    pub twitter: TwitterConfig,
}

/// Timeline lookups for the `twitter` facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwitterConfig {
    pub api_base: String,
    /// How long a fetched timeline is reused.
    pub cache_ttl_secs: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.twitter.com/1.1".to_string(),
            cache_ttl_secs: 600,
            timeout_secs: 30,
            user_agent: concat!("thingbot/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl TwitterConfig {
    pub fn cache_ttl(&self) -> Option<Duration> {
        Some(Duration::from_secs(self.cache_ttl_secs))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
