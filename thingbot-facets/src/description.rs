//! The `description` facet: free-text facts people tell the bot about a
//! thing ("alice is a rustacean").
//!
//! Stored as a list of entries under the facet's key:
//!
//! ```json
//! "description": [
//!     { "created": { "who": "bob", "when": 1700000000.0, "where": "#rust" }, "text": "a rustacean" }
//! ]
//! ```

use crate::{ensure_attached, karma, name};
use serde::{Deserialize, Serialize};
use thingbot_model::{CatalogBuilder, CommandSpec, Facet, FacetKind, ModelResult, Thing};
use thingbot_types::{Context, Provenance};
use tracing::debug;

pub const NAME: &str = "description";

/// Rendering of a thing with no descriptions.
pub const EMPTY: &str = "<no description>";

/// One stored description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Provenance>,
    pub text: String,
}

pub struct DescriptionKind;

pub struct DescriptionFacet;

impl Facet for DescriptionFacet {
    fn name(&self) -> &'static str {
        NAME
    }
}

impl FacetKind for DescriptionKind {
    fn name(&self) -> &'static str {
        NAME
    }

    fn does_attach(&self, _thing: &Thing) -> bool {
        true
    }

    fn create(&self, _thing: &Thing) -> Box<dyn Facet> {
        Box::new(DescriptionFacet)
    }

    fn commands(&self) -> &[CommandSpec] {
        const COMMANDS: &[CommandSpec] = &[
            CommandSpec::new("{thing} is {description}", "add a description to {thing}"),
            CommandSpec::new(
                "forget that {thing} is {description}",
                "drop a {description} for {thing}",
            ),
        ];
        COMMANDS
    }
}

impl DescriptionFacet {
    /// Appends a description stamped with who said it, when and where.
    pub fn add(thing: &mut Thing, text: &str, ctx: &dyn Context) -> ModelResult<()> {
        ensure_attached(thing, NAME)?;
        let entry = serde_json::to_value(Description {
            created: Some(ctx.provenance()),
            text: text.to_string(),
        })?;
        thing.data_mut(NAME).list_mut()?.push(entry);
        Ok(())
    }

    /// Removes every description whose text is exactly `text`.
    ///
    /// Returns how many were removed.
    pub fn forget(thing: &mut Thing, text: &str) -> ModelResult<usize> {
        ensure_attached(thing, NAME)?;
        let id = thing.id().clone();
        let mut data = thing.data_mut(NAME);
        let list = data.list_mut()?;
        let before = list.len();
        list.retain(|entry| entry.get("text").and_then(|t| t.as_str()) != Some(text));
        let removed = before - list.len();
        debug!(thing = %id, removed, "Forgot descriptions");
        Ok(removed)
    }

    /// The stored descriptions, oldest first. Malformed entries are skipped.
    pub fn descriptions(thing: &Thing) -> Vec<Description> {
        thing
            .data(NAME)
            .and_then(|data| data.as_array())
            .into_iter()
            .flatten()
            .filter_map(|entry| Description::deserialize(entry).ok())
            .collect()
    }

    /// All description texts joined with `", "`, or [`EMPTY`].
    pub fn present(thing: &Thing) -> String {
        let texts: Vec<String> = Self::descriptions(thing).into_iter().map(|d| d.text).collect();
        if texts.is_empty() {
            EMPTY.to_string()
        } else {
            texts.join(", ")
        }
    }
}

/// `"<label>: <descriptions>"`, or just the label when there are none.
fn with_descriptions(thing: &Thing, label: String) -> String {
    if DescriptionFacet::descriptions(thing).is_empty() {
        label
    } else {
        format!("{label}: {}", DescriptionFacet::present(thing))
    }
}

pub(crate) fn register(builder: &mut CatalogBuilder) -> ModelResult<()> {
    builder
        .facet(DescriptionKind)?
        .presenter(&[name::NAME, NAME], 0, |thing, ctx| {
            let label = thing.describe_facets(ctx, &[name::NAME])?.unwrap_or_default();
            Ok(Some(with_descriptions(thing, label)))
        })?
        .presenter(&[name::NAME, karma::NAME, NAME], 0, |thing, ctx| {
            let label = thing
                .describe_facets(ctx, &[name::NAME, karma::NAME])?
                .unwrap_or_default();
            Ok(Some(with_descriptions(thing, label)))
        })?;
    Ok(())
}
