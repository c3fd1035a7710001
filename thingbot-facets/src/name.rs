//! The `name` facet: every thing has a display name.

use thingbot_model::{CatalogBuilder, Facet, FacetKind, ModelResult, Thing};

pub const NAME: &str = "name";

pub struct NameKind;

/// Marker instance. The display name itself is a reserved document key.
pub struct NameFacet;

impl Facet for NameFacet {
    fn name(&self) -> &'static str {
        NAME
    }
}

impl FacetKind for NameKind {
    fn name(&self) -> &'static str {
        NAME
    }

    fn does_attach(&self, _thing: &Thing) -> bool {
        true
    }

    fn create(&self, _thing: &Thing) -> Box<dyn Facet> {
        Box::new(NameFacet)
    }
}

pub(crate) fn register(builder: &mut CatalogBuilder) -> ModelResult<()> {
    builder
        .facet(NameKind)?
        .presenter(&[NAME], 0, |thing, _| Ok(Some(thing.name().to_string())))?;
    Ok(())
}
