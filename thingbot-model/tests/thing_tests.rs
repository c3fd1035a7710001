mod common;

use common::{ctx, new_thing, standard_catalog, FlagFacet, FlagKind};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use thingbot_model::{CatalogBuilder, ModelError, Thing};
use thingbot_types::{Document, ThingId};

fn doc(value: serde_json::Value) -> Document {
    value.as_object().cloned().unwrap()
}

// ── Construction ─────────────────────────────────────────────────

#[test]
fn create_sets_name_and_provenance() {
    let catalog = standard_catalog();
    let thing = new_thing(&catalog, "Alice");
    assert_eq!(thing.id().as_str(), "alice");
    assert_eq!(thing.name(), "Alice");
    let created = thing.created().unwrap();
    assert_eq!(created.who, "tester");
    assert_eq!(created.location, "#test");
}

#[test]
fn eligible_facets_auto_attach() {
    let catalog = standard_catalog();
    let thing = new_thing(&catalog, "alice");
    assert_eq!(thing.facet_names().collect::<Vec<_>>(), vec!["description", "name"]);
    assert!(!thing.has_facet("twitter"));
}

#[test]
fn eligibility_can_depend_on_the_thing() {
    let catalog = standard_catalog();
    assert!(new_thing(&catalog, "#rust").has_facet("channel"));
    assert!(!new_thing(&catalog, "rust").has_facet("channel"));
}

#[test]
fn excluded_facets_do_not_auto_attach() {
    let catalog = standard_catalog();
    let thing = Thing::from_document(
        Arc::clone(&catalog),
        ThingId::from_name("bob"),
        doc(json!({"name": "bob", "-facets": ["description"]})),
    );
    assert!(!thing.has_facet("description"));
    assert!(thing.has_facet("name"));
}

#[test]
fn persistent_facets_bypass_eligibility() {
    let catalog = standard_catalog();
    let thing = Thing::from_document(
        Arc::clone(&catalog),
        ThingId::from_name("bob"),
        doc(json!({"name": "bob", "+facets": ["twitter", "twitter"]})),
    );
    assert!(thing.has_facet("twitter"));
    assert_eq!(thing.persistent_facets(), vec!["twitter".to_string()]);
}

#[test]
fn persistent_facets_win_over_exclusion() {
    let catalog = standard_catalog();
    let thing = Thing::from_document(
        Arc::clone(&catalog),
        ThingId::from_name("bob"),
        doc(json!({"name": "bob", "-facets": ["description"], "+facets": ["description"]})),
    );
    assert!(thing.has_facet("description"));
}

#[test]
fn unknown_persistent_facet_is_skipped_but_kept() {
    let catalog = standard_catalog();
    let thing = Thing::from_document(
        Arc::clone(&catalog),
        ThingId::from_name("bob"),
        doc(json!({"name": "bob", "+facets": ["retired"]})),
    );
    assert!(!thing.has_facet("retired"));
    assert_eq!(thing.document()["+facets"], json!(["retired"]));
}

#[test]
fn missing_name_falls_back_to_id() {
    let thing = Thing::from_document(standard_catalog(), ThingId::from_name("carol"), Document::new());
    assert_eq!(thing.name(), "carol");
    assert!(thing.created().is_none());
}

#[test]
fn on_attach_runs_once_per_binding() {
    let catalog = {
        let mut builder = CatalogBuilder::new();
        builder.facet(FlagKind::always("flag")).unwrap();
        builder.build()
    };
    let mut thing = new_thing(&catalog, "x");
    assert_eq!(thing.facet::<FlagFacet>().unwrap().attach_hooks, 1);

    // Persistent attach binds a fresh instance.
    thing.attach_persistent("flag").unwrap();
    assert_eq!(thing.facet::<FlagFacet>().unwrap().attach_hooks, 1);
}

// ── Persistent attach / detach ───────────────────────────────────

#[test]
fn attach_persistent_records_and_binds() {
    let catalog = standard_catalog();
    let mut thing = new_thing(&catalog, "bob");
    thing.attach_persistent("twitter").unwrap();
    thing.attach_persistent("twitter").unwrap();
    assert!(thing.has_facet("twitter"));
    assert_eq!(thing.document()["+facets"], json!(["twitter"]));
}

#[test]
fn attach_persistent_survives_reload() {
    let catalog = standard_catalog();
    let mut thing = new_thing(&catalog, "bob");
    thing.attach_persistent("twitter").unwrap();

    let reloaded = Thing::from_document(
        Arc::clone(&catalog),
        thing.id().clone(),
        thing.document().clone(),
    );
    assert!(reloaded.has_facet("twitter"));
}

#[test]
fn attach_persistent_unknown_facet_leaves_document_alone() {
    let catalog = standard_catalog();
    let mut thing = new_thing(&catalog, "bob");
    let before = thing.document().clone();
    let err = thing.attach_persistent("karma").unwrap_err();
    assert!(matches!(err, ModelError::FacetNotFound(_)));
    assert_eq!(thing.document(), &before);
}

#[test]
fn attach_persistent_rejects_corrupt_list() {
    let catalog = standard_catalog();
    let mut thing = Thing::from_document(
        Arc::clone(&catalog),
        ThingId::from_name("bob"),
        doc(json!({"name": "bob", "+facets": "twitter"})),
    );
    let err = thing.attach_persistent("twitter").unwrap_err();
    assert!(matches!(err, ModelError::InvalidFacetData { .. }));
}

#[test]
fn detach_persistent_keeps_sub_document() {
    let catalog = standard_catalog();
    let mut thing = new_thing(&catalog, "bob");
    thing.attach_persistent("twitter").unwrap();
    thing.data_mut("twitter").insert("username", "bobby").unwrap();

    assert!(thing.detach_persistent("twitter"));
    assert!(!thing.has_facet("twitter"));
    assert_eq!(thing.document()["+facets"], json!([]));
    assert_eq!(thing.data("twitter"), Some(&json!({"username": "bobby"})));

    assert!(!thing.detach_persistent("twitter"));
}

#[test]
fn exclude_drops_auto_attached_facet() {
    let catalog = standard_catalog();
    let mut thing = new_thing(&catalog, "bob");
    thing.exclude("description").unwrap();
    assert!(!thing.has_facet("description"));
    assert_eq!(thing.excluded_facets().into_iter().collect::<Vec<_>>(), vec!["description"]);

    let reloaded = Thing::from_document(
        Arc::clone(&catalog),
        thing.id().clone(),
        thing.document().clone(),
    );
    assert!(!reloaded.has_facet("description"));
}

#[test]
fn exclude_keeps_persistent_facet() {
    let catalog = standard_catalog();
    let mut thing = new_thing(&catalog, "bob");
    thing.attach_persistent("twitter").unwrap();
    thing.exclude("twitter").unwrap();
    assert!(thing.has_facet("twitter"));
}

// ── Facet data ───────────────────────────────────────────────────

#[test]
fn data_reads_before_writes_see_nothing() {
    let catalog = standard_catalog();
    let mut thing = new_thing(&catalog, "bob");
    assert_eq!(thing.data("twitter"), None);
    let view = thing.data_mut("twitter");
    assert!(!view.exists());
    assert_eq!(view.get("username"), None);
}

#[test]
fn data_auto_vivifies_on_write() {
    let catalog = standard_catalog();
    let mut thing = new_thing(&catalog, "bob");
    thing.data_mut("description").list_mut().unwrap().push(json!({"text": "tall"}));
    thing.data_mut("ircchannel").insert("topic", "rust").unwrap();
    assert_eq!(thing.data("description"), Some(&json!([{"text": "tall"}])));
    assert_eq!(thing.data("ircchannel"), Some(&json!({"topic": "rust"})));
}

#[test]
fn data_shape_mismatch_is_an_error() {
    let catalog = standard_catalog();
    let mut thing = new_thing(&catalog, "bob");
    thing.data_mut("description").list_mut().unwrap();
    let err = thing.data_mut("description").object_mut().unwrap_err();
    assert_eq!(err.to_string(), "data under 'description' is not an object");
}

#[test]
fn data_cannot_overwrite_reserved_keys() {
    let catalog = standard_catalog();
    let mut thing = new_thing(&catalog, "bob");
    assert!(thing.data_mut("name").insert("x", 1).is_err());
    assert_eq!(thing.data_mut("name").clear(), None);
    assert_eq!(thing.name(), "bob");
}

#[test]
fn data_cannot_remove_from_reserved_keys() {
    let catalog = standard_catalog();
    let mut thing = new_thing(&catalog, "bob");
    assert_eq!(thing.data_mut("created").remove("who"), None);
    assert_eq!(thing.created().unwrap().who, "tester");
}

#[test]
fn clear_removes_sub_document() {
    let catalog = standard_catalog();
    let mut thing = new_thing(&catalog, "bob");
    thing.data_mut("twitter").insert("username", "b").unwrap();
    assert_eq!(thing.data_mut("twitter").remove("username"), Some(json!("b")));
    assert!(thing.data_mut("twitter").clear().is_some());
    assert_eq!(thing.data("twitter"), None);
}

#[test]
fn facet_mut_pairs_instance_with_its_data() {
    let catalog = standard_catalog();
    let mut thing = new_thing(&catalog, "bob");
    let (facet, mut data) = thing.facet_mut::<FlagFacet>().unwrap();
    assert_eq!(data.facet(), facet.name);
    data.insert("touched", true).unwrap();
    let name = facet.name;
    assert_eq!(thing.data(name), Some(&json!({"touched": true})));
}

// ── Describe ─────────────────────────────────────────────────────

#[test]
fn describe_uses_composite_rule() {
    let catalog = standard_catalog();
    let thing = new_thing(&catalog, "Alice");
    assert_eq!(thing.describe(&ctx()).unwrap(), "Alice: described");
}

#[test]
fn describe_falls_back_to_narrow_rule() {
    let catalog = standard_catalog();
    let thing = Thing::from_document(
        Arc::clone(&catalog),
        ThingId::from_name("alice"),
        doc(json!({"name": "Alice", "-facets": ["description"]})),
    );
    assert_eq!(thing.describe(&ctx()).unwrap(), "Alice");
}

#[test]
fn describe_joins_lines_and_drops_empty_fragments() {
    let catalog = standard_catalog();
    let mut thing = new_thing(&catalog, "#rust");
    thing.attach_persistent("twitter").unwrap();
    // The channel presenter renders nothing and contributes no line.
    assert_eq!(thing.describe(&ctx()).unwrap(), "#rust: described\ntweets");
}

#[test]
fn describe_facets_is_exact() {
    let catalog = standard_catalog();
    let thing = new_thing(&catalog, "Alice");
    assert_eq!(
        thing.describe_facets(&ctx(), &["name"]).unwrap(),
        Some("Alice".to_string())
    );
    let err = thing.describe_facets(&ctx(), &["karma"]).unwrap_err();
    assert!(matches!(err, ModelError::PresenterNotFound(_)));
}

#[test]
fn describe_with_empty_catalog_is_empty() {
    let thing = Thing::create(
        thingbot_model::Catalog::empty(),
        ThingId::from_name("x"),
        "x",
        &ctx(),
    );
    assert_eq!(thing.describe(&ctx()).unwrap(), "");
}
