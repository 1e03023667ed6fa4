//! Board layout: grouping tasks into columns and the drag-transfer
//! capability.
//!
//! Grouping is a stable partition: within a column tasks keep the relative
//! order they have in the source collection. No sort key is applied here;
//! ordering is whatever the task store yields.

use std::collections::HashMap;

use crate::task::{Column, Task};

/// Derived, regenerable view of the board: each column's ordered tasks.
#[derive(Debug, Clone, Default)]
pub struct BoardView {
    columns: HashMap<Column, Vec<Task>>,
}

impl BoardView {
    /// Tasks assigned to `column`, in source order.
    pub fn column(&self, column: Column) -> &[Task] {
        self.columns.get(&column).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Columns with their tasks, in board order.
    pub fn iter(&self) -> impl Iterator<Item = (Column, &[Task])> {
        Column::ALL.iter().map(|&column| (column, self.column(column)))
    }

    pub fn total(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }
}

/// Stable partition of `tasks` by column.
pub fn group_by_column(tasks: &[Task]) -> BoardView {
    let mut columns: HashMap<Column, Vec<Task>> = HashMap::new();
    for column in Column::ALL {
        columns.insert(column, Vec::new());
    }
    for task in tasks {
        columns
            .entry(task.column)
            .or_default()
            .push(task.clone());
    }
    BoardView { columns }
}

/// A committed transfer request: move the dragged task to this column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropRequest {
    pub task_id: i64,
    pub target: Column,
}

/// Input-system-independent drag capability.
///
/// Hovering never mutates anything; only [`DragState::drop_on`] commits a
/// transfer, and even that merely yields a request for the controller to
/// resolve against the store.
#[derive(Debug, Default)]
pub struct DragState {
    dragged: Option<i64>,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_drag(&mut self, task_id: i64) {
        self.dragged = Some(task_id);
    }

    pub fn dragging(&self) -> Option<i64> {
        self.dragged
    }

    pub fn cancel(&mut self) {
        self.dragged = None;
    }

    /// Ends the drag, yielding the transfer request if one was in progress.
    pub fn drop_on(&mut self, target: Column) -> Option<DropRequest> {
        self.dragged.take().map(|task_id| DropRequest { task_id, target })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task(id: i64, column: Column) -> Task {
        Task {
            id,
            name: format!("Task {}", id),
            description: String::new(),
            tags: Vec::new(),
            column,
            due_date: None,
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn grouping_is_a_stable_partition() {
        let tasks = vec![
            task(1, Column::Todo),
            task(2, Column::Done),
            task(3, Column::Todo),
            task(4, Column::InProgress),
            task(5, Column::Todo),
        ];
        let view = group_by_column(&tasks);

        let todo_ids: Vec<i64> = view.column(Column::Todo).iter().map(|t| t.id).collect();
        assert_eq!(todo_ids, vec![1, 3, 5]);
        assert_eq!(view.column(Column::InProgress).len(), 1);
        assert_eq!(view.column(Column::Done).len(), 1);

        // Every task lands in exactly one column.
        let mut all_ids: Vec<i64> = view
            .iter()
            .flat_map(|(_, tasks)| tasks.iter().map(|t| t.id))
            .collect();
        all_ids.sort_unstable();
        assert_eq!(all_ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(view.total(), tasks.len());
    }

    #[test]
    fn empty_columns_are_present_and_empty() {
        let view = group_by_column(&[]);
        for column in Column::ALL {
            assert!(view.column(column).is_empty());
        }
        assert_eq!(view.total(), 0);
    }

    #[test]
    fn drop_without_drag_yields_nothing() {
        let mut drag = DragState::new();
        assert_eq!(drag.drop_on(Column::Done), None);
    }

    #[test]
    fn drop_consumes_the_drag() {
        let mut drag = DragState::new();
        drag.begin_drag(42);
        assert_eq!(drag.dragging(), Some(42));

        let request = drag.drop_on(Column::Done).unwrap();
        assert_eq!(request, DropRequest { task_id: 42, target: Column::Done });
        assert_eq!(drag.dragging(), None);
        assert_eq!(drag.drop_on(Column::Done), None);
    }

    #[test]
    fn cancel_clears_the_drag() {
        let mut drag = DragState::new();
        drag.begin_drag(7);
        drag.cancel();
        assert_eq!(drag.drop_on(Column::Todo), None);
    }
}
