//! Terminal implementations of the context and channel traits.

use thingbot_facets::ChannelControl;
use thingbot_types::Context;
use tracing::info;

/// Replies go to stdout; replies aimed elsewhere are labelled with their
/// destination.
pub struct ConsoleContext {
    who: String,
}

impl ConsoleContext {
    pub fn new(who: impl Into<String>) -> Self {
        Self { who: who.into() }
    }
}

impl Context for ConsoleContext {
    fn who(&self) -> &str {
        &self.who
    }

    fn location(&self) -> &str {
        "console"
    }

    fn reply(&self, message: &str) {
        println!("{message}");
    }

    fn reply_to(&self, message: &str, location: &str) {
        if location == self.location() {
            self.reply(message);
        } else {
            println!("[{location}] {message}");
        }
    }
}

/// No IRC connection here: joins and leaves are only logged.
pub struct LoggingControl;

impl ChannelControl for LoggingControl {
    fn join(&self, channel: &str) {
        info!(channel, "Join requested");
    }

    fn leave(&self, channel: &str) {
        info!(channel, "Leave requested");
    }
}
