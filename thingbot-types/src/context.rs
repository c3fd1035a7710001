//! The caller context handed to facets and presenters.

use crate::Provenance;
use std::sync::{Mutex, PoisonError};

/// What the command layer tells the core about the current request.
///
/// The same context flows unchanged into presenters and facet operations.
pub trait Context {
    /// Identity of the requester.
    fn who(&self) -> &str;

    /// Originating location (channel, query window, terminal).
    fn location(&self) -> &str;

    /// Sends a message back to where the request came from.
    fn reply(&self, message: &str);

    /// Sends a message to an explicit location.
    fn reply_to(&self, message: &str, location: &str) {
        let _ = location;
        self.reply(message);
    }

    /// Stamp used when this request creates a record.
    fn provenance(&self) -> Provenance {
        Provenance::now(self.who(), self.location())
    }
}

/// A context with a fixed requester and location that records every reply.
#[derive(Debug, Default)]
pub struct SimpleContext {
    who: String,
    location: String,
    replies: Mutex<Vec<(String, String)>>,
}

impl SimpleContext {
    pub fn new(who: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            who: who.into(),
            location: location.into(),
            replies: Mutex::new(Vec::new()),
        }
    }

    /// Messages sent so far, in order.
    pub fn replies(&self) -> Vec<String> {
        self.sent().into_iter().map(|(message, _)| message).collect()
    }

    /// Messages sent so far paired with their destination.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns every recorded reply.
    pub fn take_replies(&self) -> Vec<String> {
        let mut replies = self.replies.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *replies)
            .into_iter()
            .map(|(message, _)| message)
            .collect()
    }
}

impl Context for SimpleContext {
    fn who(&self) -> &str {
        &self.who
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn reply(&self, message: &str) {
        self.reply_to(message, &self.location);
    }

    fn reply_to(&self, message: &str, location: &str) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((message.to_string(), location.to_string()));
    }
}
