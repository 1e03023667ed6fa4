//! Task detail session: the ephemeral draft behind the create/edit dialog.
//!
//! A session owns a private copy of the edited fields and never touches the
//! canonical task until a submit commits through the store. Cancel/close is
//! simply dropping the session; the next open starts from a clean slate.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::task::{Task, TaskDraft};

/// Whether the session creates a new task or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Create,
    Edit(i64),
}

/// Editable draft of a single task.
#[derive(Debug, Clone)]
pub struct TaskDetailSession {
    mode: SessionMode,
    pub name: String,
    pub description: String,
    selected_tag_ids: Vec<i64>,
    pub due_date: Option<DateTime<Utc>>,
    error: Option<String>,
    saving: bool,
}

impl TaskDetailSession {
    /// Opens a blank create-mode session.
    pub fn open_create() -> Self {
        Self {
            mode: SessionMode::Create,
            name: String::new(),
            description: String::new(),
            selected_tag_ids: Vec::new(),
            due_date: None,
            error: None,
            saving: false,
        }
    }

    /// Opens an edit-mode session seeded from the source task.
    pub fn open_edit(task: &Task) -> Self {
        Self {
            mode: SessionMode::Edit(task.id),
            name: task.name.clone(),
            description: task.description.clone(),
            selected_tag_ids: task.tag_ids(),
            due_date: task.due_date,
            error: None,
            saving: false,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn saving(&self) -> bool {
        self.saving
    }

    /// Selected tag ids, in selection order.
    pub fn selected_tag_ids(&self) -> &[i64] {
        &self.selected_tag_ids
    }

    pub fn is_selected(&self, tag_id: i64) -> bool {
        self.selected_tag_ids.contains(&tag_id)
    }

    /// Adds or removes a tag id. Idempotent per toggle; selection order is
    /// preserved for display.
    pub fn toggle_tag(&mut self, tag_id: i64) {
        if let Some(index) = self.selected_tag_ids.iter().position(|&id| id == tag_id) {
            self.selected_tag_ids.remove(index);
        } else {
            self.selected_tag_ids.push(tag_id);
        }
    }

    /// Selects a tag id if not already selected (used after in-session tag
    /// creation).
    pub fn select_tag(&mut self, tag_id: i64) {
        if !self.is_selected(tag_id) {
            self.selected_tag_ids.push(tag_id);
        }
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.saving && !self.name.trim().is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("name is required".to_string()));
        }
        Ok(())
    }

    /// Validates and produces the trimmed submit payload, marking the
    /// session as saving.
    pub fn begin_submit(&mut self) -> Result<TaskDraft> {
        self.validate()?;
        self.error = None;
        self.saving = true;
        Ok(TaskDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            tag_ids: self.selected_tag_ids.clone(),
            due_date: self.due_date,
        })
    }

    /// Records a failed save; the session stays open for retry.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.saving = false;
    }

    /// Clears a previously shown error (e.g. when the user edits a field).
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Tag;
    use crate::task::Column;
    use chrono::TimeZone;

    fn source_task() -> Task {
        Task {
            id: 3,
            name: "Task with Tags".to_string(),
            description: "Has multiple tags".to_string(),
            tags: vec![
                Tag { id: 1, name: "Bug".to_string(), color: "#EF4444".to_string() },
                Tag { id: 2, name: "Feature".to_string(), color: "#22C55E".to_string() },
            ],
            column: Column::InProgress,
            due_date: None,
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn create_mode_opens_blank() {
        let session = TaskDetailSession::open_create();
        assert_eq!(session.mode(), SessionMode::Create);
        assert!(session.name.is_empty());
        assert!(session.description.is_empty());
        assert!(session.selected_tag_ids().is_empty());
        assert!(session.due_date.is_none());
        assert!(!session.can_submit());
    }

    #[test]
    fn edit_mode_seeds_from_source() {
        let session = TaskDetailSession::open_edit(&source_task());
        assert_eq!(session.mode(), SessionMode::Edit(3));
        assert_eq!(session.name, "Task with Tags");
        assert_eq!(session.selected_tag_ids(), &[1, 2]);
        assert!(session.can_submit());
    }

    #[test]
    fn reopen_after_cancel_starts_clean() {
        let mut session = TaskDetailSession::open_create();
        session.name = "Half-typed".to_string();
        session.toggle_tag(5);
        drop(session);

        let reopened = TaskDetailSession::open_create();
        assert!(reopened.name.is_empty());
        assert!(reopened.selected_tag_ids().is_empty());
        assert!(reopened.error().is_none());
    }

    #[test]
    fn tag_toggle_preserves_selection_order() {
        let mut session = TaskDetailSession::open_create();
        session.toggle_tag(1);
        session.toggle_tag(2);
        assert_eq!(session.selected_tag_ids(), &[1, 2]);

        session.toggle_tag(1);
        assert_eq!(session.selected_tag_ids(), &[2]);

        session.toggle_tag(1);
        assert_eq!(session.selected_tag_ids(), &[2, 1]);
    }

    #[test]
    fn select_tag_is_idempotent() {
        let mut session = TaskDetailSession::open_create();
        session.select_tag(9);
        session.select_tag(9);
        assert_eq!(session.selected_tag_ids(), &[9]);
    }

    #[test]
    fn whitespace_name_blocks_submission() {
        let mut session = TaskDetailSession::open_create();
        session.name = "   ".to_string();
        assert!(!session.can_submit());
        assert!(matches!(session.begin_submit(), Err(Error::Validation(_))));
        assert!(!session.saving());
    }

    #[test]
    fn submit_trims_name_and_description() {
        let mut session = TaskDetailSession::open_create();
        session.name = "  Test Item  ".to_string();
        session.description = " details ".to_string();

        let draft = session.begin_submit().unwrap();
        assert_eq!(draft.name, "Test Item");
        assert_eq!(draft.description, "details");
        assert!(session.saving());
        assert!(!session.can_submit());
    }

    #[test]
    fn failed_save_keeps_session_open_for_retry() {
        let mut session = TaskDetailSession::open_create();
        session.name = "Test Item".to_string();
        let _ = session.begin_submit().unwrap();

        session.fail("Remote store error: 500");
        assert_eq!(session.error(), Some("Remote store error: 500"));
        assert!(!session.saving());
        assert!(session.can_submit());
    }
}
