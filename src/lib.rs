//! kb - Kanban Board Client Library
//!
//! This library provides the core functionality for the kb CLI and TUI,
//! a task board client for a remote item store.
//!
//! # Core Concepts
//!
//! - **Columns**: A fixed, ordered set of workflow stages (todo, inprogress, done)
//! - **Tasks**: Work items with a name, description, tags, and optional due date
//! - **Tags**: A many-to-many taxonomy of named, colored labels
//! - **Urgency**: Due-date proximity classification (overdue / urgent / normal)
//! - **Optimistic sync**: Local mutations apply immediately and roll back on
//!   remote failure
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.kb.toml`
//! - `error`: Error types and result aliases
//! - `task`: Task and column domain types
//! - `tag`: Tags and the cached tag registry
//! - `due`: Due-date urgency classification
//! - `remote`: Remote item store client (REST/JSON)
//! - `store`: Canonical task collection with optimistic reconciliation
//! - `board`: Column grouping and the drag-transfer capability
//! - `session`: Ephemeral task detail editing sessions
//! - `controller`: Board controller composing the above
//! - `prefs`: Theme preference behind a key-value capability
//! - `ui`: Ratatui board front end

pub mod board;
pub mod cli;
pub mod config;
pub mod controller;
pub mod due;
pub mod error;
pub mod output;
pub mod prefs;
pub mod remote;
pub mod session;
pub mod store;
pub mod tag;
pub mod task;
pub mod ui;

pub use error::{Error, Result};
