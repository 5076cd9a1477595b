// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Task records and identifiers.
//!
//! The reordering core only reads `column_id`, `position`, `seq` and
//! `version`. Everything the CRUD layer cares about lives in [`TaskPayload`],
//! which the core carries around without interpreting.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::stamp::Stamp;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                $name(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                $name(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name(id)
            }
        }
    };
}

string_id!(
    /// Stable identifier of a task.
    TaskId
);
string_id!(
    /// Identifier of a board column (`todo`, `in_progress`, ...).
    ColumnId
);
string_id!(
    /// Identifier of the project a board belongs to.
    ProjectId
);

/// Task urgency, shown on cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(Error::InvalidPriority(s.to_string())),
        }
    }
}

/// Fields owned by the CRUD layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPayload {
    pub title: String,
    pub description: Option<String>,
    pub assignee: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub due: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl TaskPayload {
    pub fn new(title: impl Into<String>) -> Self {
        TaskPayload {
            title: title.into(),
            description: None,
            assignee: None,
            priority: Priority::default(),
            due: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due(mut self, due: NaiveDate) -> Self {
        self.due = Some(due);
        self
    }
}

/// A card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub column_id: ColumnId,
    /// Sort key within the column; dense `0..n` while no drag is running.
    pub position: u32,
    /// Insertion order, the tie-breaker when positions collide.
    pub seq: u64,
    /// Stamp of the last move applied to this task.
    pub version: Option<Stamp>,
    pub payload: TaskPayload,
}

impl Task {
    pub fn new(
        id: impl Into<TaskId>,
        project_id: impl Into<ProjectId>,
        column_id: impl Into<ColumnId>,
        payload: TaskPayload,
    ) -> Self {
        Task {
            id: id.into(),
            project_id: project_id.into(),
            column_id: column_id.into(),
            position: 0,
            seq: 0,
            version: None,
            payload,
        }
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            id: self.id.clone(),
            title: self.payload.title.clone(),
            assignee: self.payload.assignee.clone(),
            priority: self.payload.priority,
            due: self.payload.due,
            position: self.position,
        }
    }
}

/// What a renderer needs to draw a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: TaskId,
    pub title: String,
    pub assignee: Option<String>,
    pub priority: Priority,
    pub due: Option<NaiveDate>,
    pub position: u32,
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
