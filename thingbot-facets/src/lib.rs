//! Built-in facets for thingbot.
//!
//! Each module holds one facet variant: its [`FacetKind`], the runtime
//! [`Facet`](thingbot_model::Facet) instance, the operations commands call on
//! it, and the presenters that render it.
//!
//! | facet         | attaches when                 |
//! |---------------|-------------------------------|
//! | `name`        | always                        |
//! | `description` | always                        |
//! | `karma`       | always                        |
//! | `ircchannel`  | display name starts with `#`  |
//! | `ircuser`     | only persistently (`seen`)    |
//! | `twitter`     | only persistently (`link`)    |

pub mod config;
pub mod description;
mod error;
pub mod irc;
pub mod karma;
pub mod name;
pub mod twitter;

pub use config::{FacetsConfig, TwitterConfig};
pub use description::{Description, DescriptionFacet};
pub use error::{FacetsError, FacetsResult, TwitterError};
pub use irc::{ChannelControl, IrcChannelFacet, IrcUserFacet};
pub use karma::KarmaFacet;
pub use name::NameFacet;
pub use twitter::{HttpTimelineSource, Status, StatusUser, TimelineSource, TwitterFacet};

use std::sync::Arc;
use std::time::Duration;
use thingbot_model::{CatalogBuilder, Facet, FacetData, ModelError, ModelResult, Thing};

/// Registers every built-in facet and presenter, with timelines fetched
/// over HTTP as configured.
pub fn register_builtin(builder: &mut CatalogBuilder, config: &FacetsConfig) -> FacetsResult<()> {
    let source = HttpTimelineSource::new(&config.twitter)?;
    register_with_timeline(builder, Arc::new(source), config.twitter.cache_ttl())?;
    Ok(())
}

/// Registers every built-in facet and presenter, with timelines coming
/// from `source`.
pub fn register_with_timeline(
    builder: &mut CatalogBuilder,
    source: Arc<dyn TimelineSource>,
    cache_ttl: Option<Duration>,
) -> ModelResult<()> {
    name::register(builder)?;
    karma::register(builder)?;
    description::register(builder)?;
    irc::register(builder)?;
    twitter::register(builder, source, cache_ttl)?;
    Ok(())
}

pub(crate) fn not_attached(thing: &Thing, facet: &str) -> ModelError {
    ModelError::NotAttached {
        facet: facet.to_string(),
        thing: thing.id().to_string(),
    }
}

/// Fails unless `facet` is attached to `thing`.
pub(crate) fn ensure_attached(thing: &Thing, facet: &str) -> ModelResult<()> {
    if thing.has_facet(facet) {
        Ok(())
    } else {
        Err(not_attached(thing, facet))
    }
}

/// The attached instance of `F` and its data view.
pub(crate) fn attached_mut<'t, F: Facet>(
    thing: &'t mut Thing,
    facet: &str,
) -> ModelResult<(&'t mut F, FacetData<'t>)> {
    let missing = not_attached(thing, facet);
    thing.facet_mut::<F>().ok_or(missing)
}
