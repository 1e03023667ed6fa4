//! kb list command implementation
//!
//! Prints the board grouped by column, with due-date urgency per task.

use chrono::Utc;

use crate::board::group_by_column;
use crate::config::Config;
use crate::due::classify;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::Task;

/// Options for the list command
pub struct ListOptions {
    pub config: Config,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct BoardReport {
    columns: Vec<ColumnReport>,
}

#[derive(serde::Serialize)]
struct ColumnReport {
    column: &'static str,
    title: &'static str,
    tasks: Vec<TaskReport>,
}

#[derive(serde::Serialize)]
struct TaskReport {
    id: i64,
    name: String,
    description: String,
    tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<chrono::DateTime<chrono::Utc>>,
    urgency: &'static str,
}

pub fn run(options: ListOptions) -> Result<()> {
    let runtime = super::runtime()?;
    let remote = super::connect(&options.config)?;
    let tasks = runtime.block_on(remote.list_items())?;

    // One wall-clock read per render pass.
    let now = Utc::now();
    let view = group_by_column(&tasks);

    let mut columns = Vec::new();
    let mut human = HumanOutput::new("Board");
    for (column, tasks) in view.iter() {
        human.push_summary(column.title(), tasks.len().to_string());
        let reports: Vec<TaskReport> = tasks.iter().map(|task| report(task, now)).collect();
        for task in &reports {
            let mut line = format!("[{}] #{} {}", column.key(), task.id, task.name);
            if task.urgency != "none" {
                line.push_str(&format!(" ({})", task.urgency));
            }
            if !task.tags.is_empty() {
                line.push_str(&format!(" [{}]", task.tags.join(", ")));
            }
            human.push_detail(line);
        }
        columns.push(ColumnReport {
            column: column.key(),
            title: column.title(),
            tasks: reports,
        });
    }

    let report = BoardReport { columns };
    emit_success(
        OutputOptions { json: options.json, quiet: options.quiet },
        "list",
        &report,
        Some(&human),
    )
}

fn report(task: &Task, now: chrono::DateTime<chrono::Utc>) -> TaskReport {
    TaskReport {
        id: task.id,
        name: task.name.clone(),
        description: task.description.clone(),
        tags: task.tags.iter().map(|tag| tag.name.clone()).collect(),
        due_date: task.due_date,
        urgency: classify(task.due_date, now).label(),
    }
}
