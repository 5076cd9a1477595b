// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;
use tracing::debug;

use kb_core::{ColumnId, Database, Priority, Task, TaskId, TaskPayload, TaskStore};

use super::{parse_due, Workspace};
use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::id::generate_unique_id;

/// Fields of a task being created.
#[derive(Debug, Default)]
pub struct NewTask {
    pub title: String,
    pub column: Option<String>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub due: Option<String>,
    pub description: Option<String>,
}

pub fn run(task: NewTask, output: OutputFormat) -> Result<()> {
    let workspace = Workspace::open()?;
    let db = workspace.open_db()?;
    let mut store = workspace.load_store(&db)?;

    let created = create(&workspace.config.project, &db, &mut store, task)?;

    match output {
        OutputFormat::Text => {
            let column = store
                .columns()
                .get(&created.column_id)
                .map(|c| c.name.as_str())
                .unwrap_or(created.column_id.as_str());
            println!("Created {} in {}: {}", created.id, column, created.payload.title);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&created)?),
        OutputFormat::Id => println!("{}", created.id),
    }
    Ok(())
}

/// Appends the task to its column in `store` and saves it.
pub(crate) fn create(
    project: &str,
    db: &Database,
    store: &mut TaskStore,
    task: NewTask,
) -> Result<Task> {
    let title = task.title.trim().to_string();
    if title.is_empty() {
        return Err(Error::FieldEmpty { field: "title" });
    }
    let column = task
        .column
        .map(ColumnId::from)
        .unwrap_or_else(|| store.columns().first().id.clone());

    let created_at = Utc::now();
    let id = generate_unique_id(project, &title, &created_at, |candidate| {
        store.contains(&TaskId::from(candidate))
            || db.task_exists(&TaskId::from(candidate)).unwrap_or(false)
    });

    let mut payload = TaskPayload::new(title);
    payload.created_at = created_at;
    payload.priority = task.priority.unwrap_or_default();
    payload.assignee = task.assignee;
    payload.description = task.description;
    payload.due = task.due.as_deref().map(parse_due).transpose()?;

    let task = store
        .insert(Task::new(id, project, column, payload))?
        .clone();
    db.insert_task(&task)?;
    debug!(task = %task.id, column = %task.column_id, position = task.position, "task created");
    Ok(task)
}

#[cfg(test)]
#[path = "new_tests.rs"]
mod tests;
