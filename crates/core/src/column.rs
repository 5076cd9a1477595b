// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Board columns.
//!
//! A board's columns are fixed for as long as the board is open. Nothing in
//! the drag or reorder code creates or removes a column.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::task::ColumnId;

/// A named workflow bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    /// Rendering hint only.
    #[serde(default)]
    pub accent: Option<String>,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, name: impl Into<String>) -> Self {
        Column {
            id: id.into(),
            name: name.into(),
            accent: None,
        }
    }

    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = Some(accent.into());
        self
    }
}

/// Ordered, non-empty set of columns with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    columns: Vec<Column>,
}

impl ColumnSet {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::NoColumns);
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.id == column.id) {
                return Err(Error::DuplicateColumn(column.id.to_string()));
            }
        }
        Ok(ColumnSet { columns })
    }

    /// `todo`, `in_progress`, `in_review`, `completed`.
    pub fn standard() -> Self {
        ColumnSet {
            columns: vec![
                Column::new("todo", "To Do").with_accent("slate"),
                Column::new("in_progress", "In Progress").with_accent("blue"),
                Column::new("in_review", "In Review").with_accent("amber"),
                Column::new("completed", "Completed").with_accent("green"),
            ],
        }
    }

    pub fn contains(&self, id: &ColumnId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ColumnId> {
        self.columns.iter().map(|c| &c.id)
    }

    pub fn first(&self) -> &Column {
        // Non-empty by construction.
        &self.columns[0]
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Comma-separated ids, for error hints.
    pub fn describe(&self) -> String {
        self.ids().map(ColumnId::as_str).collect::<Vec<_>>().join(", ")
    }

    /// Error for an id that is not on this board.
    pub fn not_found(&self, id: &ColumnId) -> Error {
        Error::ColumnNotFound(id.to_string(), self.describe())
    }
}

impl Default for ColumnSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
#[path = "column_tests.rs"]
mod tests;
