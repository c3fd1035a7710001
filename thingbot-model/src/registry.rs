//! Registry of known facet kinds.

use crate::error::{ModelError, ModelResult};
use crate::facet::{CommandSpec, FacetKind};
use crate::Thing;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Catalog of facet kinds keyed by name.
///
/// Filled once at startup; a [`Catalog`](crate::Catalog) freezes it.
/// Iteration is by name, but nothing relies on attach order.
#[derive(Default)]
pub struct FacetRegistry {
    kinds: BTreeMap<&'static str, Box<dyn FacetKind>>,
}

impl FacetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a facet kind. Registering a name twice is an error and
    /// never replaces the first registration.
    pub fn register<K: FacetKind + 'static>(&mut self, kind: K) -> ModelResult<()> {
        let name = kind.name();
        if self.kinds.contains_key(name) {
            return Err(ModelError::DuplicateFacet(name.to_string()));
        }
        info!(facet = name, commands = kind.commands().len(), "Facet registered");
        self.kinds.insert(name, Box::new(kind));
        Ok(())
    }

    /// Looks up a facet kind by name.
    pub fn lookup(&self, name: &str) -> ModelResult<&dyn FacetKind> {
        self.kinds
            .get(name)
            .map(|kind| &**kind)
            .ok_or_else(|| ModelError::FacetNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// Registered facet names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.kinds.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Every command binding, paired with the facet that declares it.
    pub fn commands(&self) -> Vec<(&'static str, &CommandSpec)> {
        self.kinds
            .iter()
            .flat_map(|(name, kind)| kind.commands().iter().map(move |spec| (*name, spec)))
            .collect()
    }

    /// Attaches every eligible kind not named in `exclude` to `thing`.
    pub fn attach_all(&self, thing: &mut Thing, exclude: &BTreeSet<String>) {
        for (name, kind) in &self.kinds {
            if exclude.contains(*name) {
                debug!(thing = %thing.id(), facet = *name, "Facet excluded from auto-attach");
                continue;
            }
            if kind.does_attach(thing) {
                thing.bind(&**kind);
                debug!(thing = %thing.id(), facet = *name, "Facet auto-attached");
            }
        }
    }
}
