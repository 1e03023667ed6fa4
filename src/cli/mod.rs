//! Command-line interface for kb
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::remote::{HttpRemote, Remote};

mod board;
mod health;
mod item;
mod list;
mod tag;

/// kb - Kanban Board
///
/// A task board client for a remote item store: fixed workflow columns,
/// drag-and-drop moves, tags, and due-date urgency.
#[derive(Parser, Debug)]
#[command(name = "kb")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file (defaults to ./.kb.toml)
    #[arg(long, global = true, env = "KB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the item store API (overrides configuration)
    #[arg(long, global = true, env = "KB_API_URL")]
    pub api_url: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive board (TUI)
    Board,

    /// List the board grouped by column
    List,

    /// Add a task (lands in the todo column)
    Add {
        /// Task name
        name: String,

        /// Task description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Tag ids to attach (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<i64>,

        /// Due date (RFC 3339 timestamp or YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Move a task to another column
    Move {
        /// Task id
        id: i64,

        /// Target column: todo, inprogress, done
        column: String,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: i64,
    },

    /// List known tags
    Tags,

    /// Create a tag
    TagAdd {
        /// Tag name
        name: String,

        /// Tag color (#RRGGBB)
        #[arg(default_value = "#6366F1")]
        color: String,
    },

    /// Check remote store connectivity
    Health,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_default()?,
        };
        if let Some(api_url) = &self.api_url {
            config.api.base_url = api_url.clone();
        }

        let json = self.json;
        let quiet = self.quiet;

        match self.command {
            Commands::Board => board::run(board::BoardOptions { config }),
            Commands::List => list::run(list::ListOptions { config, json, quiet }),
            Commands::Add { name, description, tags, due } => item::run_add(item::AddOptions {
                name,
                description,
                tags,
                due,
                config,
                json,
                quiet,
            }),
            Commands::Move { id, column } => item::run_move(item::MoveOptions {
                id,
                column,
                config,
                json,
                quiet,
            }),
            Commands::Rm { id } => item::run_rm(item::RmOptions { id, config, json, quiet }),
            Commands::Tags => tag::run_ls(tag::LsOptions { config, json, quiet }),
            Commands::TagAdd { name, color } => tag::run_add(tag::AddOptions {
                name,
                color,
                config,
                json,
                quiet,
            }),
            Commands::Health => health::run(health::HealthOptions { config, json, quiet }),
        }
    }
}

/// Builds the HTTP remote from configuration.
pub(crate) fn connect(config: &Config) -> Result<Arc<dyn Remote>> {
    let remote = HttpRemote::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?;
    Ok(Arc::new(remote))
}

/// Single-command runtime for awaiting remote calls.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
