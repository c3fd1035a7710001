//! IRC facets: channels and the users seen in them.

use crate::ensure_attached;
use thingbot_model::{CatalogBuilder, CommandSpec, Facet, FacetKind, ModelResult, Thing};
use thingbot_types::Context;
use tracing::debug;

pub const CHANNEL: &str = "ircchannel";
pub const USER: &str = "ircuser";

const TOPIC: &str = "topic";
const VERIFIED: &str = "verified";

/// The connection-level actions the channel commands need.
pub trait ChannelControl {
    fn join(&self, channel: &str);
    fn leave(&self, channel: &str);
}

// =============================================================================
// Channels
// =============================================================================

pub struct IrcChannelKind;

pub struct IrcChannelFacet;

impl Facet for IrcChannelFacet {
    fn name(&self) -> &'static str {
        CHANNEL
    }
}

impl FacetKind for IrcChannelKind {
    fn name(&self) -> &'static str {
        CHANNEL
    }

    fn does_attach(&self, thing: &Thing) -> bool {
        thing.name().starts_with('#')
    }

    fn create(&self, _thing: &Thing) -> Box<dyn Facet> {
        Box::new(IrcChannelFacet)
    }

    fn commands(&self) -> &[CommandSpec] {
        const COMMANDS: &[CommandSpec] = &[
            CommandSpec::new("join {thing}", "join the channel {thing}"),
            CommandSpec::new("leave {thing}", "leave the channel {thing}"),
        ];
        COMMANDS
    }
}

impl IrcChannelFacet {
    pub fn topic(thing: &Thing) -> Option<&str> {
        thing.data(CHANNEL)?.get(TOPIC)?.as_str()
    }

    pub fn set_topic(thing: &mut Thing, topic: &str) -> ModelResult<()> {
        ensure_attached(thing, CHANNEL)?;
        thing.data_mut(CHANNEL).insert(TOPIC, topic)?;
        Ok(())
    }

    pub fn join(thing: &Thing, control: &dyn ChannelControl) -> ModelResult<()> {
        ensure_attached(thing, CHANNEL)?;
        debug!(channel = %thing.name(), "Joining");
        control.join(thing.name());
        Ok(())
    }

    /// Says goodbye in the channel, then leaves it.
    pub fn leave(
        thing: &Thing,
        ctx: &dyn Context,
        control: &dyn ChannelControl,
    ) -> ModelResult<()> {
        ensure_attached(thing, CHANNEL)?;
        ctx.reply_to("Bye!", thing.name());
        control.leave(thing.name());
        Ok(())
    }
}

// =============================================================================
// Users
// =============================================================================

/// Never attaches on its own; [`IrcUserFacet::mark_seen`] attaches it.
pub struct IrcUserKind;

pub struct IrcUserFacet;

impl Facet for IrcUserFacet {
    fn name(&self) -> &'static str {
        USER
    }
}

impl FacetKind for IrcUserKind {
    fn name(&self) -> &'static str {
        USER
    }

    fn does_attach(&self, _thing: &Thing) -> bool {
        false
    }

    fn create(&self, _thing: &Thing) -> Box<dyn Facet> {
        Box::new(IrcUserFacet)
    }
}

impl IrcUserFacet {
    /// Records that the thing spoke on IRC, making it a user for good.
    pub fn mark_seen(thing: &mut Thing) -> ModelResult<()> {
        thing.attach_persistent(USER)
    }

    pub fn verified(thing: &Thing) -> bool {
        thing
            .data(USER)
            .and_then(|data| data.get(VERIFIED))
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    pub fn set_verified(thing: &mut Thing, verified: bool) -> ModelResult<()> {
        ensure_attached(thing, USER)?;
        thing.data_mut(USER).insert(VERIFIED, verified)?;
        Ok(())
    }
}

pub(crate) fn register(builder: &mut CatalogBuilder) -> ModelResult<()> {
    builder
        .facet(IrcChannelKind)?
        .facet(IrcUserKind)?
        .presenter(&[CHANNEL], 0, |thing, _| {
            Ok(IrcChannelFacet::topic(thing)
                .filter(|topic| !topic.is_empty())
                .map(|topic| format!("Topic: {topic}")))
        })?;
    Ok(())
}
