//! kb add / move / rm command implementations.
//!
//! These commands drive the same optimistic task store the TUI uses; for a
//! one-shot CLI invocation the optimistic phase is invisible, but the
//! validation and error mapping are identical.

use crate::config::Config;
use crate::due;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::session::TaskDetailSession;
use crate::store::TaskStore;
use crate::task::{Column, Task};

/// Options for the add command
pub struct AddOptions {
    pub name: String,
    pub description: String,
    pub tags: Vec<i64>,
    pub due: Option<String>,
    pub config: Config,
    pub json: bool,
    pub quiet: bool,
}

/// Options for the move command
pub struct MoveOptions {
    pub id: i64,
    pub column: String,
    pub config: Config,
    pub json: bool,
    pub quiet: bool,
}

/// Options for the rm command
pub struct RmOptions {
    pub id: i64,
    pub config: Config,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let due_date = options.due.as_deref().map(due::parse_due).transpose()?;

    // The session enforces the same validation and trimming the dialog does.
    let mut session = TaskDetailSession::open_create();
    session.name = options.name;
    session.description = options.description;
    for tag_id in options.tags {
        session.select_tag(tag_id);
    }
    session.due_date = due_date;
    let draft = session.begin_submit()?;

    let runtime = super::runtime()?;
    let remote = super::connect(&options.config)?;
    let mut store = TaskStore::new(remote);
    let created = runtime.block_on(store.create(draft, Vec::new()))?;

    let mut human = HumanOutput::new(format!("Created task #{}", created.id));
    human.push_summary("name", created.name.clone());
    human.push_summary("column", created.column.key());
    emit_success(
        OutputOptions { json: options.json, quiet: options.quiet },
        "add",
        &created,
        Some(&human),
    )
}

pub fn run_move(options: MoveOptions) -> Result<()> {
    let column = Column::parse(&options.column)?;

    let runtime = super::runtime()?;
    let remote = super::connect(&options.config)?;
    let mut store = TaskStore::new(remote);
    runtime.block_on(store.sync())?;

    let moved = runtime.block_on(store.move_task(options.id, column))?;
    let task: &Task = store
        .get(options.id)
        .ok_or_else(|| Error::NotFound(format!("task {}", options.id)))?;

    let header = if moved {
        format!("Moved task #{} to {}", task.id, column.key())
    } else {
        format!("Task #{} is already in {}", task.id, column.key())
    };
    let human = HumanOutput::new(header);
    emit_success(
        OutputOptions { json: options.json, quiet: options.quiet },
        "move",
        task,
        Some(&human),
    )
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let runtime = super::runtime()?;
    let remote = super::connect(&options.config)?;
    let mut store = TaskStore::new(remote);
    runtime.block_on(store.sync())?;
    runtime.block_on(store.delete(options.id))?;

    let human = HumanOutput::new(format!("Deleted task #{}", options.id));
    emit_success(
        OutputOptions { json: options.json, quiet: options.quiet },
        "rm",
        &serde_json::json!({ "id": options.id }),
        Some(&human),
    )
}

