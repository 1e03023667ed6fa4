//! Board controller: wires user gestures to store, registry, and session
//! operations and exposes the derived board view plus connectivity status.
//!
//! Composition only; every rule about rollback, validation, or ordering
//! lives in the component it belongs to.

use std::sync::Arc;

use tracing::warn;

use crate::board::{group_by_column, BoardView, DragState};
use crate::error::Result;
use crate::remote::Remote;
use crate::session::{SessionMode, TaskDetailSession};
use crate::store::TaskStore;
use crate::tag::{Tag, TagRegistry};
use crate::task::Column;

/// Remote-connectivity status derived from the last sync/health outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Checking,
    Healthy,
    Disconnected,
}

pub struct BoardController {
    remote: Arc<dyn Remote>,
    store: TaskStore,
    tags: TagRegistry,
    session: Option<TaskDetailSession>,
    drag: DragState,
    connectivity: Connectivity,
}

impl BoardController {
    pub fn new(remote: Arc<dyn Remote>) -> Self {
        Self {
            store: TaskStore::new(Arc::clone(&remote)),
            remote,
            tags: TagRegistry::new(),
            session: None,
            drag: DragState::new(),
            connectivity: Connectivity::Checking,
        }
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    pub fn session(&self) -> Option<&TaskDetailSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut TaskDetailSession> {
        self.session.as_mut()
    }

    pub fn dragging(&self) -> Option<i64> {
        self.drag.dragging()
    }

    /// Board view model: tasks grouped by column in stable order.
    pub fn view(&self) -> BoardView {
        group_by_column(self.store.tasks())
    }

    /// Full refresh: task sync, tag fetch, connectivity. A failed sync keeps
    /// local state and flips the status to disconnected instead of raising.
    pub async fn refresh(&mut self) {
        self.connectivity = Connectivity::Checking;

        if let Err(err) = self.tags.refresh(self.remote.as_ref()).await {
            warn!(error = %err, "tag fetch failed");
        }

        match self.store.sync().await {
            Ok(()) => self.connectivity = Connectivity::Healthy,
            Err(err) => {
                warn!(error = %err, "sync failed; keeping local state");
                self.connectivity = Connectivity::Disconnected;
            }
        }
    }

    /// Health probe without touching board state.
    pub async fn check_health(&mut self) {
        self.connectivity = if self.remote.health().await {
            Connectivity::Healthy
        } else {
            Connectivity::Disconnected
        };
    }

    pub fn open_create(&mut self) {
        self.session = Some(TaskDetailSession::open_create());
    }

    /// Opens the detail session for an existing task; a stale id is ignored.
    pub fn open_detail(&mut self, task_id: i64) {
        if let Some(task) = self.store.get(task_id) {
            self.session = Some(TaskDetailSession::open_edit(task));
        }
    }

    /// Discards the draft without touching the store.
    pub fn cancel_session(&mut self) {
        self.session = None;
    }

    /// Submits the open session. Returns whether a commit happened; on
    /// failure the session stays open with the error banner populated.
    pub async fn submit_session(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let draft = match session.begin_submit() {
            Ok(draft) => draft,
            Err(err) => {
                session.fail(err.to_string());
                return false;
            }
        };
        let mode = session.mode();
        let tags = resolve_tags(&self.tags, &draft.tag_ids);

        let outcome = match mode {
            SessionMode::Create => self.store.create(draft, tags).await.map(|_| ()),
            SessionMode::Edit(id) => self.store.update(id, draft, tags).await.map(|_| ()),
        };

        match outcome {
            Ok(()) => {
                self.session = None;
                true
            }
            Err(err) => {
                if let Some(session) = self.session.as_mut() {
                    session.fail(err.to_string());
                }
                false
            }
        }
    }

    /// Creates a tag from within the session and auto-selects it. Failures
    /// land in the session's error banner as well as the returned error.
    pub async fn create_tag_in_session(&mut self, name: &str, color: &str) -> Result<Tag> {
        match self.tags.create(self.remote.as_ref(), name, color).await {
            Ok(tag) => {
                if let Some(session) = self.session.as_mut() {
                    session.select_tag(tag.id);
                }
                Ok(tag)
            }
            Err(err) => {
                if let Some(session) = self.session.as_mut() {
                    session.fail(err.to_string());
                }
                Err(err)
            }
        }
    }

    /// Optimistic delete; failures are already swallowed toward the next
    /// sync by the store.
    pub async fn delete_task(&mut self, task_id: i64) {
        let _ = self.store.delete(task_id).await;
    }

    pub fn begin_drag(&mut self, task_id: i64) {
        self.drag.begin_drag(task_id);
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Commits a drop onto `target`. Dropping a task on the column it
    /// already occupies changes nothing and issues no remote call.
    pub async fn drop_on(&mut self, target: Column) -> Result<bool> {
        let Some(request) = self.drag.drop_on(target) else {
            return Ok(false);
        };
        let already_there = self
            .store
            .get(request.task_id)
            .map(|task| task.column == request.target)
            .unwrap_or(true);
        if already_there {
            return Ok(false);
        }
        self.store.move_task(request.task_id, request.target).await
    }
}

/// Resolves selected tag ids against the registry cache, preserving
/// selection order. Unknown ids (e.g. cache miss during refresh) are dropped
/// from the optimistic placeholder; the server record is authoritative.
fn resolve_tags(registry: &TagRegistry, tag_ids: &[i64]) -> Vec<Tag> {
    tag_ids
        .iter()
        .filter_map(|&id| registry.get(id).cloned())
        .collect()
}
