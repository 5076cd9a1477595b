// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use tracing::debug;

use kb_core::{Database, Priority, ProjectId, Task};

use super::{clearable, parse_due, Workspace};
use crate::error::{Error, Result};

/// Requested changes; `None` leaves a field alone.
#[derive(Debug, Default)]
pub struct Changes {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub priority: Option<Priority>,
    pub due: Option<String>,
}

impl Changes {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.assignee.is_none()
            && self.priority.is_none()
            && self.due.is_none()
    }
}

pub fn run(id: &str, changes: Changes) -> Result<()> {
    let workspace = Workspace::open()?;
    let db = workspace.open_db()?;
    let task = apply(&db, &workspace.project(), id, changes)?;
    println!("Updated {}", task.id);
    Ok(())
}

/// Edits the CRUD fields of a task. Placement is only changed by moves.
pub(crate) fn apply(db: &Database, project: &ProjectId, id: &str, changes: Changes) -> Result<Task> {
    if changes.is_empty() {
        return Err(Error::NothingToEdit);
    }
    let task_id = db.resolve_id(project, id)?;
    let mut task = db.get_task(&task_id)?;
    let payload = &mut task.payload;

    if let Some(title) = changes.title {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::FieldEmpty { field: "title" });
        }
        payload.title = title.to_string();
    }
    if let Some(description) = changes.description {
        payload.description = clearable(description);
    }
    if let Some(assignee) = changes.assignee {
        payload.assignee = clearable(assignee);
    }
    if let Some(priority) = changes.priority {
        payload.priority = priority;
    }
    if let Some(due) = changes.due {
        payload.due = clearable(due).as_deref().map(parse_due).transpose()?;
    }

    db.update_payload(&task.id, &task.payload)?;
    debug!(task = %task.id, "task edited");
    Ok(task)
}

#[cfg(test)]
#[path = "edit_tests.rs"]
mod tests;
