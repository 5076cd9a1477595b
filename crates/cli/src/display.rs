// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text and JSON rendering of the board.

use serde::Serialize;

use kb_core::{Column, ColumnId, Task, TaskStore, TaskSummary};

/// One column as rendered to JSON.
#[derive(Debug, Serialize)]
pub struct ColumnView {
    pub id: ColumnId,
    pub name: String,
    pub tasks: Vec<TaskSummary>,
}

/// The whole board as rendered to JSON.
#[derive(Debug, Serialize)]
pub struct BoardView {
    pub project: String,
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    pub fn from_store(store: &TaskStore) -> Self {
        BoardView {
            project: store.project_id().to_string(),
            columns: store
                .columns()
                .iter()
                .map(|column| ColumnView {
                    id: column.id.clone(),
                    name: column.name.clone(),
                    tasks: store.column_view(&column.id),
                })
                .collect(),
        }
    }
}

/// One line per card: id, title, then whatever metadata is set.
pub fn format_card(card: &TaskSummary) -> String {
    let mut line = format!("{}  {}", card.id, card.title);
    line.push_str(&format!("  [{}]", card.priority));
    if let Some(assignee) = &card.assignee {
        line.push_str(&format!(" @{}", assignee));
    }
    if let Some(due) = &card.due {
        line.push_str(&format!(" due {}", due.format("%Y-%m-%d")));
    }
    line
}

pub fn format_column_header(column: &Column, count: usize) -> String {
    format!("{} ({})", column.name, count)
}

/// Renders every column in board order; empty columns say so.
pub fn format_board(store: &TaskStore) -> String {
    let mut out = String::new();
    for (i, column) in store.columns().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let cards = store.column_view(&column.id);
        out.push_str(&format_column_header(column, cards.len()));
        out.push('\n');
        if cards.is_empty() {
            out.push_str("  (empty)\n");
        }
        for card in &cards {
            out.push_str("  ");
            out.push_str(&format_card(card));
            out.push('\n');
        }
    }
    out
}

/// Multi-line detail view of one task.
pub fn format_task(task: &Task, column_name: &str) -> String {
    let payload = &task.payload;
    let mut out = format!("[{}] {}\n", task.id, payload.title);
    out.push_str(&format!("Column: {} (position {})\n", column_name, task.position));
    out.push_str(&format!("Priority: {}\n", payload.priority));
    if let Some(assignee) = &payload.assignee {
        out.push_str(&format!("Assignee: {}\n", assignee));
    }
    if let Some(due) = &payload.due {
        out.push_str(&format!("Due: {}\n", due.format("%Y-%m-%d")));
    }
    out.push_str(&format!(
        "Created: {}\n",
        payload.created_at.format("%Y-%m-%d %H:%M")
    ));
    if let Some(version) = &task.version {
        out.push_str(&format!("Last moved: {}\n", version));
    }
    if let Some(description) = &payload.description {
        out.push_str(&format!("\n{}\n", description));
    }
    out
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
