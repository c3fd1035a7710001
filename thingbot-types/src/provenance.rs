//! Provenance stamps recorded on newly created records.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Who created a record, when, and where.
///
/// Serialized as `{"who": ..., "when": ..., "where": ...}` with `when` in
/// fractional seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub who: String,
    pub when: f64,
    #[serde(rename = "where")]
    pub location: String,
}

impl Provenance {
    /// Creates a stamp for the current time.
    #[must_use]
    pub fn now(who: impl Into<String>, location: impl Into<String>) -> Self {
        let when = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        Self::at(who, when, location)
    }

    /// Creates a stamp with an explicit time (for testing or replay).
    #[must_use]
    pub fn at(who: impl Into<String>, when: f64, location: impl Into<String>) -> Self {
        Self {
            who: who.into(),
            when,
            location: location.into(),
        }
    }

    /// Converts the stamp into the JSON value stored in documents.
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Reads a stamp back from a stored JSON value.
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::InvalidProvenance(format!(
                "expected an object, found {value}"
            )));
        }
        Ok(Self::deserialize(value)?)
    }
}
