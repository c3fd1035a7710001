//! Command-line front end for thingbot.
//!
//! Parses a subcommand, runs it against a [`ThingStore`] and reports back
//! through a [`Context`](thingbot_types::Context). The binary wires this to
//! stdout and the configured store file.

mod cli;
mod config;
mod console;
mod run;

pub use cli::{Cli, Command};
pub use config::{BotConfig, DEFAULT_CONFIG};
pub use console::{ConsoleContext, LoggingControl};
pub use run::{execute, Outcome};

use std::sync::Arc;
use thingbot_facets::register_builtin;
use thingbot_model::{Catalog, CatalogBuilder};
use thingbot_storage::ThingStore;

/// The catalog with every built-in facet, configured from `config`.
pub fn build_catalog(config: &BotConfig) -> anyhow::Result<Arc<Catalog>> {
    let mut builder = CatalogBuilder::new();
    register_builtin(&mut builder, &config.facets())?;
    Ok(builder.build())
}

/// Opens the configured store, `store_override` taking precedence.
pub fn open_store(
    config: &BotConfig,
    store_override: Option<&std::path::Path>,
    catalog: Arc<Catalog>,
) -> anyhow::Result<ThingStore> {
    use anyhow::Context as _;

    let path = store_override.unwrap_or(config.store.path.as_path());
    ThingStore::open(path, catalog).with_context(|| format!("opening store {}", path.display()))
}
