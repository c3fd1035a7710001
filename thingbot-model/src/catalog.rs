//! The frozen pair of registries shared by every thing.

use crate::error::ModelResult;
use crate::facet::FacetKind;
use crate::presenter::PresenterRegistry;
use crate::registry::FacetRegistry;
use crate::Thing;
use std::fmt;
use std::sync::Arc;
use thingbot_types::Context;

/// Facet kinds and presenter rules, read-only once built.
///
/// Build one with [`CatalogBuilder`] before serving and share the `Arc`.
/// Nothing can register into a built catalog.
pub struct Catalog {
    facets: FacetRegistry,
    presenters: PresenterRegistry,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// A catalog with no facets or presenters.
    pub fn empty() -> Arc<Self> {
        CatalogBuilder::default().build()
    }

    pub fn facets(&self) -> &FacetRegistry {
        &self.facets
    }

    pub fn presenters(&self) -> &PresenterRegistry {
        &self.presenters
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("facets", &self.facets.names().collect::<Vec<_>>())
            .field("presenters", &self.presenters.len())
            .finish()
    }
}

/// Startup-time registration of facet kinds and presenters.
#[derive(Default)]
pub struct CatalogBuilder {
    facets: FacetRegistry,
    presenters: PresenterRegistry,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a facet kind. See [`FacetRegistry::register`].
    pub fn facet<K: FacetKind + 'static>(&mut self, kind: K) -> ModelResult<&mut Self> {
        self.facets.register(kind)?;
        Ok(self)
    }

    /// Registers a presenter. See [`PresenterRegistry::register`].
    pub fn presenter<F>(&mut self, facets: &[&str], order: i32, render: F) -> ModelResult<&mut Self>
    where
        F: Fn(&Thing, &dyn Context) -> ModelResult<Option<String>> + Send + Sync + 'static,
    {
        self.presenters.register(facets, order, render)?;
        Ok(self)
    }

    pub fn facets(&self) -> &FacetRegistry {
        &self.facets
    }

    pub fn presenters(&self) -> &PresenterRegistry {
        &self.presenters
    }

    /// Freezes the registries.
    pub fn build(self) -> Arc<Catalog> {
        Arc::new(Catalog {
            facets: self.facets,
            presenters: self.presenters,
        })
    }
}
