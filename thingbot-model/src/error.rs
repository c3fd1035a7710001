//! Error types for the thing model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by registries and things.
///
/// Duplicate and empty registrations are configuration errors and are meant
/// to abort startup. Lookup misses are reported to the immediate caller.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A facet kind with this name is already registered.
    #[error("facet already registered: {0}")]
    DuplicateFacet(String),

    /// A presenter for exactly this facet set is already registered.
    #[error("presenter already registered for facets {0}")]
    DuplicatePresenter(String),

    /// A presenter was registered without any facets.
    #[error("presenter must handle at least one facet")]
    EmptyPresenter,

    /// No facet kind with this name is registered.
    #[error("facet not found: {0}")]
    FacetNotFound(String),

    /// No presenter handles exactly this facet set.
    #[error("no presenter registered for facets {0}")]
    PresenterNotFound(String),

    /// The facet exists but is not attached to the thing.
    #[error("facet '{facet}' is not attached to '{thing}'")]
    NotAttached { facet: String, thing: String },

    /// Facet data could not be converted to or from JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The facet's sub-document (or a reserved list) has the wrong shape.
    #[error("data under '{facet}' is not {expected}")]
    InvalidFacetData {
        facet: String,
        expected: &'static str,
    },
}

/// Formats a facet set as `{a, b}` for messages.
pub(crate) fn facet_set_label<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    format!("{{{}}}", names.into_iter().collect::<Vec<_>>().join(", "))
}
