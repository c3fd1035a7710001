//! Subcommand execution.

use crate::cli::Command;
use anyhow::{bail, Result};
use thingbot_facets::{
    irc, ChannelControl, DescriptionFacet, IrcChannelFacet, IrcUserFacet, KarmaFacet, TwitterFacet,
};
use thingbot_model::Thing;
use thingbot_storage::ThingStore;
use thingbot_types::Context;
use tracing::debug;

/// What a command did to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    /// The store differs from what was loaded and should be saved.
    pub mutated: bool,
}

impl Outcome {
    const READ: Self = Self { mutated: false };
    const WRITE: Self = Self { mutated: true };
}

/// Runs `command` against `store`, replying through `ctx`.
pub fn execute(
    command: &Command,
    store: &mut ThingStore,
    ctx: &dyn Context,
    control: &dyn ChannelControl,
) -> Result<Outcome> {
    debug!(?command, who = ctx.who(), "Executing");
    match command {
        Command::List => {
            for thing in store.iter() {
                let facets: Vec<&str> = thing.facet_names().collect();
                ctx.reply(&format!("{}\t{}", thing.id(), facets.join(",")));
            }
            Ok(Outcome::READ)
        }

        Command::Describe { name, facets } => {
            let Some(thing) = store.find(name) else {
                ctx.reply(&format!("I don't know anything about {name}"));
                return Ok(Outcome::READ);
            };
            let text = if facets.is_empty() {
                thing.describe(ctx)?
            } else {
                let facets: Vec<&str> = facets.iter().map(String::as_str).collect();
                thing.describe_facets(ctx, &facets)?.unwrap_or_default()
            };
            ctx.reply(&text);
            Ok(Outcome::READ)
        }

        Command::Add { name, text } => {
            let thing = resolve(store, name, ctx, None)?;
            DescriptionFacet::add(thing, text, ctx)?;
            ctx.reply("OK");
            Ok(Outcome::WRITE)
        }

        Command::Forget { name, text } => {
            let Some(thing) = store.find_mut(name) else {
                ctx.reply(&format!("I don't know anything about {name}"));
                return Ok(Outcome::READ);
            };
            let removed = DescriptionFacet::forget(thing, text)?;
            ctx.reply(&format!("Forgot {removed} description(s) of {name}"));
            Ok(Outcome { mutated: removed > 0 })
        }

        Command::Attach { name, facet } => {
            resolve(store, name, ctx, None)?.attach_persistent(facet)?;
            ctx.reply("OK");
            Ok(Outcome::WRITE)
        }

        Command::Detach { name, facet } => {
            let Some(thing) = store.find_mut(name) else {
                ctx.reply(&format!("I don't know anything about {name}"));
                return Ok(Outcome::READ);
            };
            if thing.detach_persistent(facet) {
                ctx.reply("OK");
                Ok(Outcome::WRITE)
            } else {
                ctx.reply(&format!("{facet} is not permanently attached to {name}"));
                Ok(Outcome::READ)
            }
        }

        Command::Topic { channel, topic } => {
            IrcChannelFacet::set_topic(resolve(store, channel, ctx, Some(irc::CHANNEL))?, topic)?;
            ctx.reply("OK");
            Ok(Outcome::WRITE)
        }

        Command::Join { channel } => {
            IrcChannelFacet::join(resolve(store, channel, ctx, Some(irc::CHANNEL))?, control)?;
            Ok(Outcome::WRITE)
        }

        Command::Leave { channel } => {
            let thing = resolve(store, channel, ctx, Some(irc::CHANNEL))?;
            IrcChannelFacet::leave(thing, ctx, control)?;
            Ok(Outcome::WRITE)
        }

        Command::Twitter { name, username } => {
            let thing = resolve(store, name, ctx, None)?;
            TwitterFacet::link(thing)?;
            TwitterFacet::set_username(thing, username)?;
            ctx.reply("OK");
            Ok(Outcome::WRITE)
        }

        Command::Karma { name, delta } => {
            let thing = resolve(store, name, ctx, None)?;
            let score = KarmaFacet::adjust(thing, *delta)?;
            ctx.reply(&format!("{} now has karma {score}", thing.name()));
            Ok(Outcome::WRITE)
        }

        Command::Seen { nick } => {
            IrcUserFacet::mark_seen(resolve(store, nick, ctx, None)?)?;
            Ok(Outcome::WRITE)
        }

        Command::Commands => {
            for (facet, spec) in store.catalog().facets().commands() {
                let marker = if spec.exclusive { " [exclusive]" } else { "" };
                ctx.reply(&format!("{facet}: {} ({}){marker}", spec.template, spec.help));
            }
            Ok(Outcome::READ)
        }
    }
}

/// Get-or-create, failing when the thing lacks `facet`.
fn resolve<'s>(
    store: &'s mut ThingStore,
    name: &str,
    ctx: &dyn Context,
    facet: Option<&str>,
) -> Result<&'s mut Thing> {
    match store.get(name, ctx, facet) {
        Some(thing) => Ok(thing),
        None => bail!("{name} has no {} facet", facet.unwrap_or_default()),
    }
}
