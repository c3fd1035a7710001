//! The `twitter` facet: links a thing to a Twitter account and shows its
//! latest status.
//!
//! Timelines come from a [`TimelineSource`] and are memoized per facet
//! instance, keyed on the username, so a chatty channel does not hit the
//! API on every description.

use crate::attached_mut;
use crate::config::TwitterConfig;
use crate::error::TwitterError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thingbot_cache::{BoxProducer, SharedTtlCache};
use thingbot_model::{CatalogBuilder, CommandSpec, Facet, FacetKind, ModelResult, Thing};
use tracing::{debug, warn};

pub const NAME: &str = "twitter";

const USERNAME: &str = "username";

/// One status from a user timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub text: String,
    pub user: StatusUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUser {
    pub screen_name: String,
}

/// Where timelines come from.
pub trait TimelineSource: Send + Sync {
    /// Most recent statuses first.
    fn user_timeline(&self, username: &str) -> Result<Vec<Status>, TwitterError>;
}

/// Fetches timelines from the REST API with a blocking client.
pub struct HttpTimelineSource {
    client: reqwest::blocking::Client,
    api_base: String,
}

impl HttpTimelineSource {
    pub fn new(config: &TwitterConfig) -> Result<Self, TwitterError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TwitterError::Network(format!("http client: {e}")))?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }
}

impl TimelineSource for HttpTimelineSource {
    fn user_timeline(&self, username: &str) -> Result<Vec<Status>, TwitterError> {
        let url = format!("{}/statuses/user_timeline.json", self.api_base);
        let resp = self
            .client
            .get(&url)
            .query(&[("screen_name", username)])
            .header("Accept", "application/json")
            .send()
            .map_err(|e| TwitterError::Network(format!("fetch failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(TwitterError::Network(format!(
                "HTTP {} fetching timeline for {username}",
                resp.status()
            )));
        }

        resp.json::<Vec<Status>>()
            .map_err(|e| TwitterError::Decode(e.to_string()))
    }
}

type TimelineProducer = BoxProducer<String, Vec<Status>, TwitterError>;
type TimelineCache = SharedTtlCache<String, Vec<Status>, TimelineProducer>;

pub struct TwitterKind {
    source: Arc<dyn TimelineSource>,
    cache_ttl: Option<Duration>,
}

impl TwitterKind {
    pub fn new(source: Arc<dyn TimelineSource>, cache_ttl: Option<Duration>) -> Self {
        Self { source, cache_ttl }
    }
}

impl FacetKind for TwitterKind {
    fn name(&self) -> &'static str {
        NAME
    }

    fn does_attach(&self, _thing: &Thing) -> bool {
        false
    }

    fn create(&self, _thing: &Thing) -> Box<dyn Facet> {
        let source = Arc::clone(&self.source);
        let producer: TimelineProducer =
            Box::new(move |username: &String| source.user_timeline(username));
        Box::new(TwitterFacet {
            timeline: SharedTtlCache::new(producer, self.cache_ttl),
        })
    }

    fn commands(&self) -> &[CommandSpec] {
        const COMMANDS: &[CommandSpec] = &[
            CommandSpec::new(
                "{thing} is a twitterer",
                "link {thing}'s twitter account to their user",
            )
            .exclusive(),
            CommandSpec::new(
                "{thing} has twitter username {username}",
                "set {thing}'s twitter username to {username}",
            )
            .exclusive(),
            CommandSpec::new(
                "forget that {thing} is a twitterer",
                "unset {thing}'s twitter username",
            )
            .exclusive(),
        ];
        COMMANDS
    }
}

pub struct TwitterFacet {
    timeline: TimelineCache,
}

impl Facet for TwitterFacet {
    fn name(&self) -> &'static str {
        NAME
    }
}

impl TwitterFacet {
    /// Marks the thing as a twitterer.
    pub fn link(thing: &mut Thing) -> ModelResult<()> {
        thing.attach_persistent(NAME)
    }

    /// Sets the account name. A different name invalidates the cached
    /// timeline.
    pub fn set_username(thing: &mut Thing, username: &str) -> ModelResult<()> {
        let (facet, mut data) = attached_mut::<Self>(thing, NAME)?;
        if data.get(USERNAME).and_then(|v| v.as_str()) != Some(username) {
            data.insert(USERNAME, username)?;
            facet.timeline.reset();
            debug!(username, "Twitter username changed");
        }
        Ok(())
    }

    /// The account name, defaulting to the thing's display name.
    pub fn username(thing: &Thing) -> &str {
        thing
            .data(NAME)
            .and_then(|data| data.get(USERNAME))
            .and_then(|v| v.as_str())
            .unwrap_or_else(|| thing.name())
    }

    /// Drops the stored account and detaches the facet.
    pub fn unset(thing: &mut Thing) {
        thing.data_mut(NAME).clear();
        thing.detach_persistent(NAME);
    }

    /// The thing's timeline, from cache when fresh.
    pub fn timeline(&self, thing: &Thing) -> Result<Vec<Status>, TwitterError> {
        self.timeline.call(Self::username(thing).to_string())
    }
}

fn render_latest(statuses: &[Status]) -> Option<String> {
    statuses
        .first()
        .map(|status| format!("https://twitter.com/{}: {}", status.user.screen_name, status.text))
}

pub(crate) fn register(
    builder: &mut CatalogBuilder,
    source: Arc<dyn TimelineSource>,
    cache_ttl: Option<Duration>,
) -> ModelResult<()> {
    builder
        .facet(TwitterKind::new(source, cache_ttl))?
        .presenter(&[NAME], 0, |thing, _| {
            let Some(facet) = thing.facet::<TwitterFacet>() else {
                return Ok(None);
            };
            match facet.timeline(thing) {
                Ok(statuses) => Ok(render_latest(&statuses)),
                Err(e) => {
                    warn!(thing = %thing.id(), error = %e, "Timeline lookup failed");
                    Ok(None)
                }
            }
        })?;
    Ok(())
}
