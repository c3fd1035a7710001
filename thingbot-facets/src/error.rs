//! Error types for the built-in facets.

use thingbot_model::ModelError;
use thiserror::Error;

/// Result type for facet setup.
pub type FacetsResult<T> = Result<T, FacetsError>;

/// Errors raised while registering the built-in facets.
#[derive(Debug, Error)]
pub enum FacetsError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Twitter(#[from] TwitterError),
}

/// Errors from timeline lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TwitterError {
    /// The request could not be made or returned a failure status.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not a timeline.
    #[error("unexpected response: {0}")]
    Decode(String),
}
