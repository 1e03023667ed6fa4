//! Task and column domain types.
//!
//! A task always belongs to exactly one column of the fixed board set.
//! Server-assigned ids are positive; tasks created optimistically before the
//! remote store confirms them carry a temporary negative id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tag::Tag;

/// Workflow stage a task belongs to. Closed set, board order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Todo,
    #[serde(rename = "inprogress")]
    InProgress,
    Done,
}

impl Column {
    /// All columns in board order.
    pub const ALL: [Column; 3] = [Column::Todo, Column::InProgress, Column::Done];

    /// Stable wire key, matching the remote store's representation.
    pub fn key(&self) -> &'static str {
        match self {
            Column::Todo => "todo",
            Column::InProgress => "inprogress",
            Column::Done => "done",
        }
    }

    /// Human-readable column header.
    pub fn title(&self) -> &'static str {
        match self {
            Column::Todo => "To Do",
            Column::InProgress => "In Progress",
            Column::Done => "Done",
        }
    }

    pub fn parse(value: &str) -> Result<Column> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Column::Todo),
            "inprogress" | "in-progress" | "in_progress" => Ok(Column::InProgress),
            "done" => Ok(Column::Done),
            other => Err(Error::InvalidArgument(format!(
                "unknown column: {} (expected todo, inprogress, or done)",
                other
            ))),
        }
    }
}

impl Default for Column {
    fn default() -> Self {
        Column::Todo
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A work item on the board.
///
/// The remote store may omit `column` for records predating the board view;
/// those land in `todo`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub column: Column,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// True while the task only exists locally, awaiting remote confirmation.
    pub fn is_local(&self) -> bool {
        self.id < 0
    }

    /// Tag ids in display order.
    pub fn tag_ids(&self) -> Vec<i64> {
        self.tags.iter().map(|tag| tag.id).collect()
    }
}

/// Submit payload for creating or updating a task.
///
/// Name and description are already trimmed by the time a draft exists; the
/// detail session guarantees a non-empty name.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub tag_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}
