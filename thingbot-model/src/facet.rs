//! The facet contract.
//!
//! A facet variant is split in two: a [`FacetKind`] registered once in the
//! [`FacetRegistry`](crate::FacetRegistry) that decides eligibility and
//! builds instances, and the [`Facet`] instance that lives on a thing.
//!
//! Facet state is not stored in the instance. It lives in the owning thing's
//! document under the facet's name, reached through [`FacetData`], so it is
//! persisted with the thing. Instances only hold runtime state such as
//! caches.

use crate::error::{ModelError, ModelResult};
use crate::Thing;
use serde_json::{Map, Value};
use std::any::Any;
use thingbot_types::{keys, Document};

/// A live facet attached to a thing.
pub trait Facet: Any + Send + Sync {
    /// The facet's unique name. Must match its kind's name.
    fn name(&self) -> &'static str;

    /// Called right after the instance is bound to a thing.
    fn on_attach(&mut self, data: FacetData<'_>) {
        let _ = data;
    }
}

/// Descriptor of a facet variant, registered once at startup.
pub trait FacetKind: Send + Sync {
    /// The facet's unique name, also the key of its sub-document.
    fn name(&self) -> &'static str;

    /// Whether the facet attaches to `thing` automatically.
    ///
    /// Persistently attached facets bypass this check.
    fn does_attach(&self, thing: &Thing) -> bool;

    /// Builds a fresh instance for `thing`.
    fn create(&self, thing: &Thing) -> Box<dyn Facet>;

    /// Command bindings this facet contributes. Opaque to the model.
    fn commands(&self) -> &[CommandSpec] {
        &[]
    }
}

/// A command template a facet offers to the command layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub template: &'static str,
    pub help: &'static str,
    /// Matching this command suppresses other matches for the same input.
    pub exclusive: bool,
}

impl CommandSpec {
    pub const fn new(template: &'static str, help: &'static str) -> Self {
        Self {
            template,
            help,
            exclusive: false,
        }
    }

    pub const fn exclusive(mut self) -> Self {
        self.exclusive = true;
        self
    }
}

/// Mutable view of one facet's sub-document, `document[facet]`.
///
/// Reads before any write see nothing rather than an error. The
/// `*_mut` accessors create the sub-document on first use.
pub struct FacetData<'a> {
    facet: &'a str,
    document: &'a mut Document,
}

impl<'a> FacetData<'a> {
    pub(crate) fn new(facet: &'a str, document: &'a mut Document) -> Self {
        Self { facet, document }
    }

    /// Name of the facet this view belongs to.
    pub fn facet(&self) -> &str {
        self.facet
    }

    /// The raw sub-document, if it exists.
    pub fn value(&self) -> Option<&Value> {
        self.document.get(self.facet)
    }

    /// Whether the sub-document exists.
    pub fn exists(&self) -> bool {
        self.document.contains_key(self.facet)
    }

    /// Reads `key` from an object-shaped sub-document.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.value()?.as_object()?.get(key)
    }

    /// The sub-document as an object, created empty if absent.
    pub fn object_mut(&mut self) -> ModelResult<&mut Map<String, Value>> {
        let facet = self.facet;
        match self.vivify(Value::Object(Map::new()))? {
            Value::Object(map) => Ok(map),
            _ => Err(invalid(facet, "an object")),
        }
    }

    /// The sub-document as a list, created empty if absent.
    pub fn list_mut(&mut self) -> ModelResult<&mut Vec<Value>> {
        let facet = self.facet;
        match self.vivify(Value::Array(Vec::new()))? {
            Value::Array(list) => Ok(list),
            _ => Err(invalid(facet, "a list")),
        }
    }

    /// Sets `key` in an object-shaped sub-document, returning the old value.
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> ModelResult<Option<Value>> {
        Ok(self.object_mut()?.insert(key.to_string(), value.into()))
    }

    /// Removes `key` from an object-shaped sub-document.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        if keys::is_reserved(self.facet) {
            return None;
        }
        self.document
            .get_mut(self.facet)?
            .as_object_mut()?
            .remove(key)
    }

    /// Drops the whole sub-document, returning it.
    pub fn clear(&mut self) -> Option<Value> {
        if keys::is_reserved(self.facet) {
            return None;
        }
        self.document.remove(self.facet)
    }

    fn vivify(&mut self, empty: Value) -> ModelResult<&mut Value> {
        if keys::is_reserved(self.facet) {
            return Err(invalid(self.facet, "a facet-owned key"));
        }
        Ok(self.document.entry(self.facet).or_insert(empty))
    }
}

fn invalid(facet: &str, expected: &'static str) -> ModelError {
    ModelError::InvalidFacetData {
        facet: facet.to_string(),
        expected,
    }
}
