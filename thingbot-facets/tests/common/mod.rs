//! Shared fixtures for facet tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thingbot_facets::{register_with_timeline, ChannelControl, Status, StatusUser, TimelineSource, TwitterError};
use thingbot_model::{Catalog, CatalogBuilder, Thing};
use thingbot_types::{SimpleContext, ThingId};

/// Serves a canned timeline and counts lookups per username.
#[derive(Default)]
pub struct CountingSource {
    calls: AtomicUsize,
    requested: Mutex<Vec<String>>,
    fail: Mutex<bool>,
}

impl CountingSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

impl TimelineSource for CountingSource {
    fn user_timeline(&self, username: &str) -> Result<Vec<Status>, TwitterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(username.to_string());
        if *self.fail.lock().unwrap() {
            return Err(TwitterError::Network("HTTP 503".to_string()));
        }
        Ok(vec![Status {
            text: format!("status #{} from {username}", self.calls()),
            user: StatusUser {
                screen_name: username.to_string(),
            },
        }])
    }
}

/// Records channel joins and leaves.
#[derive(Default)]
pub struct RecordingControl {
    pub events: Mutex<Vec<String>>,
}

impl RecordingControl {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ChannelControl for RecordingControl {
    fn join(&self, channel: &str) {
        self.events.lock().unwrap().push(format!("join {channel}"));
    }

    fn leave(&self, channel: &str) {
        self.events.lock().unwrap().push(format!("leave {channel}"));
    }
}

pub fn ctx() -> SimpleContext {
    SimpleContext::new("bob", "#rust")
}

/// All built-in facets, timelines from `source`, cached for ten minutes.
pub fn catalog_with(source: Arc<CountingSource>) -> Arc<Catalog> {
    let mut builder = CatalogBuilder::new();
    register_with_timeline(&mut builder, source, Some(Duration::from_secs(600))).unwrap();
    builder.build()
}

pub fn catalog() -> Arc<Catalog> {
    catalog_with(Arc::new(CountingSource::default()))
}

pub fn thing(catalog: &Arc<Catalog>, name: &str) -> Thing {
    Thing::create(Arc::clone(catalog), ThingId::from_name(name), name, &ctx())
}
