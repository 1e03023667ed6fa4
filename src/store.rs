//! Canonical task collection with optimistic remote synchronization.
//!
//! Every mutating operation follows the same three-phase shape: apply the
//! change locally (synchronously, so a render never observes a half-applied
//! state), await the remote call, then commit the server record or roll the
//! local change back before re-raising the error. Deletes are the one
//! deliberate exception: a failed remote delete is logged and left for the
//! next `sync` to reconcile rather than resurrecting the row.

use std::sync::Arc;

use tracing::warn;

use crate::error::{Error, Result};
use crate::remote::{ItemPatch, Remote};
use crate::tag::Tag;
use crate::task::{Column, Task, TaskDraft};

/// Owns the board's tasks. Consumers read snapshots via [`TaskStore::tasks`]
/// and never mutate in place; only the store's own operations touch the
/// collection.
pub struct TaskStore {
    remote: Arc<dyn Remote>,
    tasks: Vec<Task>,
    next_local_id: i64,
}

impl TaskStore {
    pub fn new(remote: Arc<dyn Remote>) -> Self {
        Self {
            remote,
            tasks: Vec::new(),
            next_local_id: -1,
        }
    }

    /// Current task collection, in board-arrival order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    /// Replaces local state wholesale from a fresh remote fetch. On failure
    /// the existing local state is preserved.
    pub async fn sync(&mut self) -> Result<()> {
        let fetched = self.remote.list_items().await?;
        self.tasks = fetched;
        Ok(())
    }

    /// Creates a task: a temporary entry (negative id, default column) is
    /// placed immediately, then swapped for the server-confirmed record. If
    /// the server rejects the create the temporary entry is removed; local
    /// state never retains a task the server refused.
    ///
    /// `tags` are the already-resolved tag objects for `draft.tag_ids`, used
    /// only for the optimistic placeholder.
    pub async fn create(&mut self, draft: TaskDraft, tags: Vec<Tag>) -> Result<Task> {
        let local_id = self.next_local_id;
        self.next_local_id -= 1;

        let placeholder = Task {
            id: local_id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            tags,
            column: Column::Todo,
            due_date: draft.due_date,
            created_at: chrono::Utc::now(),
            updated_at: None,
        };
        self.tasks.push(placeholder);

        match self.remote.create_item(&draft).await {
            Ok(created) => {
                let index = self
                    .position(local_id)
                    .unwrap_or_else(|| self.tasks.len() - 1);
                self.tasks[index] = created.clone();
                Ok(created)
            }
            Err(err) => {
                self.tasks.retain(|task| task.id != local_id);
                Err(err)
            }
        }
    }

    /// Updates a task's editable fields. The draft is applied locally first;
    /// on remote failure the pre-update snapshot is restored and the error
    /// re-raised for the caller (typically a detail session) to display.
    pub async fn update(&mut self, id: i64, draft: TaskDraft, tags: Vec<Tag>) -> Result<Task> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::NotFound(format!("task {}", id)))?;
        let snapshot = self.tasks[index].clone();

        let task = &mut self.tasks[index];
        task.name = draft.name.clone();
        task.description = draft.description.clone();
        task.tags = tags;
        task.due_date = draft.due_date;

        match self.remote.update_item(id, &ItemPatch::from(&draft)).await {
            Ok(mut updated) => {
                // The patch never carries the column, so an echo that omits
                // it must not knock the task back to the default.
                updated.column = snapshot.column;
                self.tasks[index] = updated.clone();
                Ok(updated)
            }
            Err(err) => {
                self.tasks[index] = snapshot;
                Err(err)
            }
        }
    }

    /// Removes a task. Optimistic with no rollback: a stale id on the server
    /// is a success no-op, any other remote failure is logged and swallowed
    /// so the next `sync` can reconcile.
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        let Some(index) = self.position(id) else {
            return Ok(());
        };
        self.tasks.remove(index);

        match self.remote.delete_item(id).await {
            Ok(()) | Err(Error::NotFound(_)) => Ok(()),
            Err(err) => {
                warn!(task_id = id, error = %err, "remote delete failed; awaiting next sync");
                Ok(())
            }
        }
    }

    /// Reassigns a task's column. Already-there is a no-op that issues no
    /// remote call; otherwise the column flips locally and a column-only
    /// patch goes out, reverting on failure. Returns whether anything moved.
    pub async fn move_task(&mut self, id: i64, target: Column) -> Result<bool> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::NotFound(format!("task {}", id)))?;
        let previous = self.tasks[index].column;
        if previous == target {
            return Ok(false);
        }

        self.tasks[index].column = target;

        match self.remote.update_item(id, &ItemPatch::column(target)).await {
            Ok(mut moved) => {
                moved.column = target;
                self.tasks[index] = moved;
                Ok(true)
            }
            Err(err) => {
                if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
                    task.column = previous;
                }
                Err(err)
            }
        }
    }
}
