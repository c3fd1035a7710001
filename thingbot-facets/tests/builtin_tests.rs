mod common;

use common::{catalog, ctx, thing};
use pretty_assertions::assert_eq;
use thingbot_facets::{register_builtin, FacetsConfig};
use thingbot_model::CatalogBuilder;

#[test]
fn builtin_registers_every_facet() {
    let mut builder = CatalogBuilder::new();
    register_builtin(&mut builder, &FacetsConfig::default()).unwrap();
    let catalog = builder.build();

    let names: Vec<&str> = catalog.facets().names().collect();
    assert_eq!(
        names,
        ["description", "ircchannel", "ircuser", "karma", "name", "twitter"]
    );
}

#[test]
fn registering_twice_is_rejected() {
    let mut builder = CatalogBuilder::new();
    register_builtin(&mut builder, &FacetsConfig::default()).unwrap();
    assert!(register_builtin(&mut builder, &FacetsConfig::default()).is_err());
}

#[test]
fn plain_thing_gets_always_on_facets() {
    let catalog = catalog();
    let alice = thing(&catalog, "Alice");
    let attached: Vec<&str> = alice.facet_names().collect();
    assert_eq!(attached, ["description", "karma", "name"]);
}

#[test]
fn channel_name_gets_channel_facet() {
    let catalog = catalog();
    assert!(thing(&catalog, "#rust").has_facet("ircchannel"));
    assert!(!thing(&catalog, "rust").has_facet("ircchannel"));
}

#[test]
fn fresh_thing_describes_as_its_name() {
    let catalog = catalog();
    let alice = thing(&catalog, "Alice");
    assert_eq!(alice.describe(&ctx()).unwrap(), "Alice");
}

#[test]
fn commands_are_listed_per_facet() {
    let catalog = catalog();
    let templates: Vec<(&str, &str)> = catalog
        .facets()
        .commands()
        .into_iter()
        .map(|(facet, spec)| (facet, spec.template))
        .collect();
    assert!(templates.contains(&("description", "{thing} is {description}")));
    assert!(templates.contains(&("ircchannel", "leave {thing}")));
    assert!(templates.contains(&("twitter", "{thing} is a twitterer")));
}
