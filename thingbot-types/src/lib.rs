//! Core type definitions for thingbot.
//!
//! This crate defines the small, facet-agnostic vocabulary shared by every
//! other crate in the workspace:
//! - [`ThingId`]: the normalized storage key of a thing
//! - [`Document`]: the JSON mapping that holds a thing's persisted state
//! - [`Provenance`]: the who/when/where stamp recorded on new records
//! - [`Context`]: what a command handler or presenter knows about its caller
//!
//! Facet-specific types belong to the facets that define them, not here.

mod context;
mod ids;
mod provenance;

pub use context::{Context, SimpleContext};
pub use ids::ThingId;
pub use provenance::Provenance;

/// A thing's persisted state: string keys mapping to arbitrary JSON values.
///
/// `serde_json::Map` keeps keys sorted, so serializing a document is
/// deterministic.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Document keys that belong to the thing itself rather than to a facet.
pub mod keys {
    /// Display name.
    pub const NAME: &str = "name";
    /// Provenance stamp of the record's creation.
    pub const CREATED: &str = "created";
    /// Facet names attached regardless of eligibility.
    pub const ATTACHED: &str = "+facets";
    /// Facet names excluded from automatic attachment.
    pub const EXCLUDED: &str = "-facets";

    /// Returns true if `key` is reserved and can never be a facet's sub-document.
    #[must_use]
    pub fn is_reserved(key: &str) -> bool {
        matches!(key, NAME | CREATED | ATTACHED | EXCLUDED)
    }
}

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid provenance stamp: {0}")]
    InvalidProvenance(String),
}
