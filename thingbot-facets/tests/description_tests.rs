mod common;

use common::{catalog, ctx, thing};
use pretty_assertions::assert_eq;
use thingbot_facets::{DescriptionFacet, KarmaFacet};
use thingbot_model::ModelError;

#[test]
fn add_stamps_provenance() {
    let catalog = catalog();
    let mut alice = thing(&catalog, "Alice");
    DescriptionFacet::add(&mut alice, "a rustacean", &ctx()).unwrap();

    let descriptions = DescriptionFacet::descriptions(&alice);
    assert_eq!(descriptions.len(), 1);
    assert_eq!(descriptions[0].text, "a rustacean");
    let created = descriptions[0].created.as_ref().unwrap();
    assert_eq!(created.who, "bob");
    assert_eq!(created.location, "#rust");
}

#[test]
fn present_joins_in_order() {
    let catalog = catalog();
    let mut alice = thing(&catalog, "Alice");
    assert_eq!(DescriptionFacet::present(&alice), "<no description>");

    DescriptionFacet::add(&mut alice, "a rustacean", &ctx()).unwrap();
    DescriptionFacet::add(&mut alice, "on call", &ctx()).unwrap();
    assert_eq!(DescriptionFacet::present(&alice), "a rustacean, on call");
}

#[test]
fn forget_removes_every_match() {
    let catalog = catalog();
    let mut alice = thing(&catalog, "Alice");
    for text in ["tall", "kind", "tall"] {
        DescriptionFacet::add(&mut alice, text, &ctx()).unwrap();
    }

    assert_eq!(DescriptionFacet::forget(&mut alice, "tall").unwrap(), 2);
    assert_eq!(DescriptionFacet::present(&alice), "kind");
    assert_eq!(DescriptionFacet::forget(&mut alice, "tall").unwrap(), 0);
}

#[test]
fn describe_includes_descriptions() {
    let catalog = catalog();
    let mut alice = thing(&catalog, "Alice");
    DescriptionFacet::add(&mut alice, "a rustacean", &ctx()).unwrap();
    assert_eq!(alice.describe(&ctx()).unwrap(), "Alice: a rustacean");
}

#[test]
fn describe_includes_karma_and_descriptions() {
    let catalog = catalog();
    let mut alice = thing(&catalog, "Alice");
    KarmaFacet::adjust(&mut alice, 3).unwrap();
    DescriptionFacet::add(&mut alice, "helpful", &ctx()).unwrap();
    assert_eq!(alice.describe(&ctx()).unwrap(), "Alice (karma: 3): helpful");
}

#[test]
fn name_and_description_presenter_alone() {
    let catalog = catalog();
    let mut alice = thing(&catalog, "Alice");
    let ctx = ctx();
    assert_eq!(
        alice.describe_facets(&ctx, &["name", "description"]).unwrap().as_deref(),
        Some("Alice")
    );
    DescriptionFacet::add(&mut alice, "tall", &ctx).unwrap();
    assert_eq!(
        alice.describe_facets(&ctx, &["description", "name"]).unwrap().as_deref(),
        Some("Alice: tall")
    );
}

#[test]
fn malformed_entries_are_skipped() {
    let catalog = catalog();
    let mut alice = thing(&catalog, "Alice");
    alice
        .data_mut("description")
        .list_mut()
        .unwrap()
        .push(serde_json::json!({"no": "text"}));
    DescriptionFacet::add(&mut alice, "kind", &ctx()).unwrap();
    assert_eq!(DescriptionFacet::present(&alice), "kind");
}

#[test]
fn excluded_description_cannot_be_added() {
    let catalog = catalog();
    let mut alice = thing(&catalog, "Alice");
    alice.exclude("description").unwrap();

    let err = DescriptionFacet::add(&mut alice, "tall", &ctx()).unwrap_err();
    assert!(matches!(err, ModelError::NotAttached { ref facet, .. } if facet == "description"));
}
