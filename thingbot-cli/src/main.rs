//! thingbot command-line tool
//!
//! Runs one bot command against the thing store and saves the result.
//!
//! Usage:
//!   thingbot describe alice
//!   thingbot add alice "a rustacean"
//!   thingbot --store /srv/things.json karma bob -1

use anyhow::Result;
use clap::Parser;
use thingbot_cli::{
    build_catalog, execute, open_store, BotConfig, Cli, ConsoleContext, LoggingControl,
};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = BotConfig::load_from(&cli.config);
    let catalog = build_catalog(&config)?;
    let mut store = open_store(&config, cli.store.as_deref(), catalog)?;

    let ctx = ConsoleContext::new(cli.who.as_str());
    let outcome = execute(&cli.command, &mut store, &ctx, &LoggingControl)?;

    if outcome.mutated {
        if config.store.autosave {
            store.save()?;
        } else {
            debug!("Autosave disabled, changes discarded");
        }
    }
    Ok(())
}
