//! Thing entity model for thingbot.
//!
//! A [`Thing`] is anything the bot tracks by name: a person, a channel, a
//! topic. What a thing can do and how it is described comes from the
//! [`Facet`]s attached to it, not from its own type.
//!
//! ```text
//! ┌──────────────────────────── Catalog (frozen at startup) ───────────┐
//! │  FacetRegistry   name → FacetKind (eligibility + constructor)      │
//! │  PresenterRegistry  [facet set → render fn], most specific first   │
//! └────────────────────────────────────────────────────────────────────┘
//!                 │ attach                        │ compose
//!                 ▼                               ▼
//! ┌────────────── Thing ───────────────────────────────────────────────┐
//! │  id        normalized key                                          │
//! │  document  {name, created, +facets, -facets, <facet>: {...}, ...}  │
//! │  facets    facet name → live Box<dyn Facet>                        │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`Facet`] / [`FacetKind`]: the contract a facet variant implements
//! - [`FacetData`]: a facet's scoped view of its own sub-document
//! - [`FacetRegistry`]: known facet kinds; decides what auto-attaches
//! - [`PresenterRegistry`]: greedy, most-specific-first description rules
//! - [`Catalog`] / [`CatalogBuilder`]: both registries, built once and shared

mod catalog;
mod error;
mod facet;
mod presenter;
mod registry;
mod thing;

pub use catalog::{Catalog, CatalogBuilder};
pub use error::{ModelError, ModelResult};
pub use facet::{CommandSpec, Facet, FacetData, FacetKind};
pub use presenter::{Presenter, PresenterRegistry, RenderFn};
pub use registry::FacetRegistry;
pub use thing::Thing;
