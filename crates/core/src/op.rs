// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Move records that leave the local board.
//!
//! A single drop produces one [`TaskMoved`] per task whose placement changed.
//! Each of those becomes a [`MoveCommit`] for persistence and a
//! [`RemoteMove`] for broadcast, both carrying the drop's [`Stamp`].

use serde::{Deserialize, Serialize};

use crate::reorder::TaskMoved;
use crate::stamp::Stamp;
use crate::task::{ColumnId, ProjectId, TaskId};

/// A task's move as announced to, and received from, other clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMove {
    pub version: Stamp,
    pub task_id: TaskId,
    pub project_id: ProjectId,
    pub source_column: ColumnId,
    pub destination_column: ColumnId,
    pub position: u32,
}

impl RemoteMove {
    pub fn from_moved(moved: &TaskMoved, project_id: &ProjectId, version: Stamp) -> Self {
        RemoteMove {
            version,
            task_id: moved.task_id.clone(),
            project_id: project_id.clone(),
            source_column: moved.from_column.clone(),
            destination_column: moved.column_id.clone(),
            position: moved.position,
        }
    }

    /// The persistence record for this move.
    pub fn commit(&self) -> MoveCommit {
        MoveCommit {
            task_id: self.task_id.clone(),
            project_id: self.project_id.clone(),
            column_id: self.destination_column.clone(),
            position: self.position,
            version: self.version,
        }
    }
}

impl PartialOrd for RemoteMove {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RemoteMove {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.task_id.cmp(&other.task_id))
    }
}

/// A task's new placement, as handed to the persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCommit {
    pub task_id: TaskId,
    pub project_id: ProjectId,
    pub column_id: ColumnId,
    pub position: u32,
    pub version: Stamp,
}

/// A new position for a task whose order did not change, left behind when
/// its column closed a gap.
///
/// Only applies while the task is still at `version`; a newer move carries
/// its own position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Renumber {
    pub task_id: TaskId,
    pub column_id: ColumnId,
    pub position: u32,
    pub version: Option<Stamp>,
}

#[cfg(test)]
#[path = "op_tests.rs"]
mod tests;
