//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "thingbot")]
#[command(about = "Inspect and edit the things a thingbot knows about")]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Store file, overriding `store.path` from the config
    #[arg(short, long)]
    pub store: Option<PathBuf>,

    /// Speak as this user
    #[arg(long, default_value = "cli")]
    pub who: String,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every stored thing with its facets
    List,

    /// Describe a thing
    Describe {
        name: String,
        /// Render only the presenter for exactly these facets
        #[arg(long, value_delimiter = ',')]
        facets: Vec<String>,
    },

    /// Add a description: "<name> is <text>"
    Add { name: String, text: String },

    /// Drop a description: "forget that <name> is <text>"
    Forget { name: String, text: String },

    /// Attach a facet permanently
    Attach { name: String, facet: String },

    /// Undo a permanent attachment
    Detach { name: String, facet: String },

    /// Set a channel's topic
    Topic { channel: String, topic: String },

    /// Join a channel
    Join { channel: String },

    /// Leave a channel
    Leave { channel: String },

    /// Link a thing to a Twitter account
    Twitter { name: String, username: String },

    /// Adjust karma by a signed amount
    Karma {
        name: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// Record that a nick spoke
    Seen { nick: String },

    /// List the commands each facet offers
    Commands,
}
