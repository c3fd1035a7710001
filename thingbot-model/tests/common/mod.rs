//! Shared facet kinds for model tests.

#![allow(dead_code)]

use std::sync::Arc;
use thingbot_model::{Catalog, CatalogBuilder, CommandSpec, Facet, FacetData, FacetKind, Thing};
use thingbot_types::{SimpleContext, ThingId};

/// A facet kind with a fixed eligibility answer.
pub struct FlagKind {
    pub name: &'static str,
    pub attaches: bool,
}

impl FlagKind {
    pub const fn always(name: &'static str) -> Self {
        Self {
            name,
            attaches: true,
        }
    }

    pub const fn never(name: &'static str) -> Self {
        Self {
            name,
            attaches: false,
        }
    }
}

impl FacetKind for FlagKind {
    fn name(&self) -> &'static str {
        self.name
    }

    fn does_attach(&self, _thing: &Thing) -> bool {
        self.attaches
    }

    fn create(&self, _thing: &Thing) -> Box<dyn Facet> {
        Box::new(FlagFacet {
            name: self.name,
            attach_hooks: 0,
        })
    }
}

/// Counts how many times its attach hook ran.
pub struct FlagFacet {
    pub name: &'static str,
    pub attach_hooks: u32,
}

impl Facet for FlagFacet {
    fn name(&self) -> &'static str {
        self.name
    }

    fn on_attach(&mut self, _data: FacetData<'_>) {
        self.attach_hooks += 1;
    }
}

/// Attaches to things whose display name starts with `#`.
pub struct ChannelKind;

pub struct ChannelFacet;

impl Facet for ChannelFacet {
    fn name(&self) -> &'static str {
        "channel"
    }
}

impl FacetKind for ChannelKind {
    fn name(&self) -> &'static str {
        "channel"
    }

    fn does_attach(&self, thing: &Thing) -> bool {
        thing.name().starts_with('#')
    }

    fn create(&self, _thing: &Thing) -> Box<dyn Facet> {
        Box::new(ChannelFacet)
    }

    fn commands(&self) -> &[CommandSpec] {
        const COMMANDS: &[CommandSpec] = &[
            CommandSpec::new("join {thing}", "join the channel {thing}"),
            CommandSpec::new("leave {thing}", "leave the channel {thing}"),
        ];
        COMMANDS
    }
}

pub fn ctx() -> SimpleContext {
    SimpleContext::new("tester", "#test")
}

/// name + description (always) and twitter (never), with the usual presenters.
pub fn standard_catalog() -> Arc<Catalog> {
    let mut builder = CatalogBuilder::new();
    builder
        .facet(FlagKind::always("name"))
        .unwrap()
        .facet(FlagKind::always("description"))
        .unwrap()
        .facet(FlagKind::never("twitter"))
        .unwrap()
        .facet(ChannelKind)
        .unwrap();
    builder
        .presenter(&["name"], 0, |thing, _| Ok(Some(thing.name().to_string())))
        .unwrap()
        .presenter(&["name", "description"], 0, |thing, ctx| {
            let name = thing.describe_facets(ctx, &["name"])?.unwrap_or_default();
            Ok(Some(format!("{name}: described")))
        })
        .unwrap()
        .presenter(&["twitter"], 0, |_, _| Ok(Some("tweets".to_string())))
        .unwrap()
        .presenter(&["channel"], 0, |_, _| Ok(None))
        .unwrap();
    builder.build()
}

pub fn new_thing(catalog: &Arc<Catalog>, name: &str) -> Thing {
    Thing::create(Arc::clone(catalog), ThingId::from_name(name), name, &ctx())
}
