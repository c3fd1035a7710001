//! JSON document storage for thingbot.
//!
//! Every thing is one record in a single JSON document, keyed by its
//! normalized id, next to a format version tag:
//!
//! ```json
//! {
//!     "things": {
//!         "alice": { "name": "Alice", "created": { ... }, "description": [ ... ] }
//!     },
//!     "version": "2"
//! }
//! ```
//!
//! # Architecture
//!
//! - The whole collection is loaded eagerly; each record becomes a
//!   [`Thing`](thingbot_model::Thing) bound to the shared catalog
//! - Saves write a temporary file next to the target and rename it over the
//!   target, so a failed save never leaves a truncated store behind
//! - A missing backing file is a valid, empty store

mod config;
mod error;
mod thing_store;

pub use config::StoreConfig;
pub use error::{StorageError, StorageResult};
pub use thing_store::{ThingStore, FORMAT_VERSION};
