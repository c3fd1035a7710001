//! The `karma` facet: an integer score per thing.

use crate::{ensure_attached, name};
use thingbot_model::{CatalogBuilder, Facet, FacetKind, ModelResult, Thing};

pub const NAME: &str = "karma";

const SCORE: &str = "score";

pub struct KarmaKind;

pub struct KarmaFacet;

impl Facet for KarmaFacet {
    fn name(&self) -> &'static str {
        NAME
    }
}

impl FacetKind for KarmaKind {
    fn name(&self) -> &'static str {
        NAME
    }

    fn does_attach(&self, _thing: &Thing) -> bool {
        true
    }

    fn create(&self, _thing: &Thing) -> Box<dyn Facet> {
        Box::new(KarmaFacet)
    }
}

impl KarmaFacet {
    /// Current score, zero when never adjusted.
    pub fn score(thing: &Thing) -> i64 {
        thing
            .data(NAME)
            .and_then(|data| data.get(SCORE))
            .and_then(|score| score.as_i64())
            .unwrap_or(0)
    }

    /// Adds `delta` to the score and returns the new value.
    pub fn adjust(thing: &mut Thing, delta: i64) -> ModelResult<i64> {
        ensure_attached(thing, NAME)?;
        let score = Self::score(thing).saturating_add(delta);
        thing.data_mut(NAME).insert(SCORE, score)?;
        Ok(score)
    }
}

pub(crate) fn register(builder: &mut CatalogBuilder) -> ModelResult<()> {
    builder.facet(KarmaKind)?.presenter(&[name::NAME, NAME], 0, |thing, ctx| {
        let label = thing.describe_facets(ctx, &[name::NAME])?.unwrap_or_default();
        Ok(Some(match KarmaFacet::score(thing) {
            0 => label,
            score => format!("{label} (karma: {score})"),
        }))
    })?;
    Ok(())
}
