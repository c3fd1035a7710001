//! Identifier types used throughout thingbot.
//!
//! Things are addressed by name. The storage key is the name with surrounding
//! whitespace removed and case folded, so "Alice" and " alice " are the same
//! thing.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Normalized unique key of a thing in the store.
///
/// The id is derived from the display name once, when the thing is created.
/// Renaming a thing later does not move its record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThingId(String);

impl ThingId {
    /// Derives the id for a display name: trimmed and lowercased.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if normalizing this id again would not change it.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        Self::from_name(&self.0) == *self
    }
}

impl fmt::Display for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ThingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ThingId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
