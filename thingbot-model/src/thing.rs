//! The thing entity.

use crate::catalog::Catalog;
use crate::error::{ModelError, ModelResult};
use crate::facet::{Facet, FacetData, FacetKind};
use serde_json::Value;
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use thingbot_types::{keys, Context, Document, Provenance, ThingId};
use tracing::{debug, warn};

/// A named record with a persisted document and a set of live facets.
///
/// The document is the only persisted state. The facet map is rebuilt from
/// it whenever a thing is constructed: eligible kinds attach automatically
/// unless listed under `-facets`, and every kind listed under `+facets`
/// attaches regardless of eligibility.
pub struct Thing {
    id: ThingId,
    document: Document,
    facets: BTreeMap<&'static str, Box<dyn Facet>>,
    catalog: Arc<Catalog>,
}

impl Thing {
    /// Creates a brand-new thing with a fresh document.
    pub fn create(catalog: Arc<Catalog>, id: ThingId, name: &str, ctx: &dyn Context) -> Self {
        let mut document = Document::new();
        document.insert(keys::NAME.to_string(), Value::String(name.to_string()));
        match ctx.provenance().to_value() {
            Ok(created) => {
                document.insert(keys::CREATED.to_string(), created);
            }
            Err(e) => warn!(thing = %id, error = %e, "Failed to stamp new thing"),
        }
        Self::from_document(catalog, id, document)
    }

    /// Rebuilds a thing from a stored document.
    ///
    /// A `+facets` entry naming an unregistered facet is kept in the
    /// document but not instantiated.
    pub fn from_document(catalog: Arc<Catalog>, id: ThingId, document: Document) -> Self {
        let mut thing = Self {
            id,
            document,
            facets: BTreeMap::new(),
            catalog: Arc::clone(&catalog),
        };

        let excluded = thing.excluded_facets();
        catalog.facets().attach_all(&mut thing, &excluded);

        for name in thing.persistent_facets() {
            if thing.facets.contains_key(name.as_str()) {
                continue;
            }
            match catalog.facets().lookup(&name) {
                Ok(kind) => thing.bind(kind),
                Err(_) => {
                    warn!(thing = %thing.id, facet = %name, "Persistent facet is not registered")
                }
            }
        }
        thing
    }

    pub fn id(&self) -> &ThingId {
        &self.id
    }

    /// Display name, falling back to the id when the document has none.
    pub fn name(&self) -> &str {
        self.document
            .get(keys::NAME)
            .and_then(Value::as_str)
            .unwrap_or(self.id.as_str())
    }

    /// Provenance stamp recorded at creation, if present and well formed.
    pub fn created(&self) -> Option<Provenance> {
        self.document
            .get(keys::CREATED)
            .and_then(|value| Provenance::from_value(value).ok())
    }

    /// The persisted document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consumes the thing, returning its document.
    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    // =========================================================================
    // Facets
    // =========================================================================

    pub fn has_facet(&self, name: &str) -> bool {
        self.facets.contains_key(name)
    }

    /// Names of the currently attached facets, sorted.
    pub fn facet_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.facets.keys().copied()
    }

    /// The attached facet of type `F`.
    pub fn facet<F: Facet>(&self) -> Option<&F> {
        self.facets.values().find_map(|facet| {
            let any: &dyn Any = &**facet;
            any.downcast_ref::<F>()
        })
    }

    /// The attached facet of type `F` together with its data view.
    pub fn facet_mut<F: Facet>(&mut self) -> Option<(&mut F, FacetData<'_>)> {
        let Self {
            facets, document, ..
        } = self;
        let (name, facet) = facets.iter_mut().find_map(|(name, facet)| {
            let any: &mut dyn Any = &mut **facet;
            any.downcast_mut::<F>().map(|facet| (*name, facet))
        })?;
        Some((facet, FacetData::new(name, document)))
    }

    /// Read-only access to a facet's sub-document.
    pub fn data(&self, facet: &str) -> Option<&Value> {
        self.document.get(facet)
    }

    /// Scoped mutable view of a facet's sub-document.
    pub fn data_mut<'a>(&'a mut self, facet: &'a str) -> FacetData<'a> {
        FacetData::new(facet, &mut self.document)
    }

    /// Facet names listed under `+facets`, without duplicates.
    pub fn persistent_facets(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.name_list(keys::ATTACHED)
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }

    /// Facet names listed under `-facets`.
    pub fn excluded_facets(&self) -> BTreeSet<String> {
        self.name_list(keys::EXCLUDED).map(str::to_string).collect()
    }

    /// Attaches a facet permanently, bypassing its eligibility check.
    ///
    /// Records the name under `+facets` once and binds a fresh instance,
    /// replacing any instance already attached under that name.
    pub fn attach_persistent(&mut self, name: &str) -> ModelResult<()> {
        let catalog = Arc::clone(&self.catalog);
        let kind = catalog.facets().lookup(name)?;
        let attached = self.name_list_mut(keys::ATTACHED)?;
        if !attached.iter().any(|v| v.as_str() == Some(name)) {
            attached.push(Value::String(name.to_string()));
        }
        self.bind(kind);
        debug!(thing = %self.id, facet = name, "Facet attached persistently");
        Ok(())
    }

    /// Removes a facet from `+facets` and drops its live instance.
    ///
    /// The facet's sub-document is left alone. Returns whether the facet was
    /// persistently attached.
    pub fn detach_persistent(&mut self, name: &str) -> bool {
        let was_listed = match self.document.get_mut(keys::ATTACHED) {
            Some(Value::Array(list)) => {
                let before = list.len();
                list.retain(|v| v.as_str() != Some(name));
                list.len() != before
            }
            _ => false,
        };
        self.facets.remove(name);
        debug!(thing = %self.id, facet = name, was_listed, "Facet detached");
        was_listed
    }

    /// Excludes a facet from future auto-attachment.
    ///
    /// The live instance is dropped unless the facet is persistently
    /// attached, which always wins.
    pub fn exclude(&mut self, name: &str) -> ModelResult<()> {
        let excluded = self.name_list_mut(keys::EXCLUDED)?;
        if !excluded.iter().any(|v| v.as_str() == Some(name)) {
            excluded.push(Value::String(name.to_string()));
        }
        if !self.persistent_facets().iter().any(|n| n == name) {
            self.facets.remove(name);
        }
        Ok(())
    }

    pub(crate) fn bind(&mut self, kind: &dyn FacetKind) {
        let name = kind.name();
        let mut facet = kind.create(self);
        facet.on_attach(FacetData::new(name, &mut self.document));
        self.facets.insert(name, facet);
    }

    fn name_list(&self, key: &str) -> impl Iterator<Item = &str> + '_ {
        self.document
            .get(key)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    fn name_list_mut(&mut self, key: &'static str) -> ModelResult<&mut Vec<Value>> {
        match self
            .document
            .entry(key)
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(list) => Ok(list),
            _ => Err(ModelError::InvalidFacetData {
                facet: key.to_string(),
                expected: "a list of facet names",
            }),
        }
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Describes the thing from all of its attached facets.
    ///
    /// Runs the greedy composition over the attached facet names and joins
    /// the non-empty fragments with newlines.
    pub fn describe(&self, ctx: &dyn Context) -> ModelResult<String> {
        let mut lines = Vec::new();
        for presenter in self.catalog.presenters().compose(self.facet_names()) {
            if let Some(line) = presenter.render(self, ctx)? {
                if !line.is_empty() {
                    lines.push(line);
                }
            }
        }
        Ok(lines.join("\n"))
    }

    /// Runs the one presenter registered for exactly `facets`.
    ///
    /// Fails with [`ModelError::PresenterNotFound`] when there is none.
    pub fn describe_facets(
        &self,
        ctx: &dyn Context,
        facets: &[&str],
    ) -> ModelResult<Option<String>> {
        self.catalog.presenters().get(facets)?.render(self, ctx)
    }
}

impl fmt::Debug for Thing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thing")
            .field("id", &self.id)
            .field("facets", &self.facets.keys().collect::<Vec<_>>())
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}
