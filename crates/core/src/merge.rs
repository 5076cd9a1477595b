// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Applying other clients' moves.
//!
//! Merge rules:
//! - A move whose version is not newer than the task's current version is
//!   stale and ignored.
//! - Moves for tasks, projects or columns this board does not know are
//!   ignored.
//! - Accepted moves of one batch are applied together: placements first,
//!   then each affected column is renumbered once, then subscribers are
//!   notified once.
//!
//! Applying the same batch twice is a no-op the second time.

use std::collections::HashSet;

use tracing::debug;

use crate::op::RemoteMove;
use crate::store::TaskStore;

/// Applies remote moves with per-task last-version-wins resolution.
pub trait Merge {
    /// Applies a batch of moves and returns how many were accepted.
    fn apply_remote(&mut self, moves: &[RemoteMove]) -> usize;
}

impl Merge for TaskStore {
    fn apply_remote(&mut self, moves: &[RemoteMove]) -> usize {
        let mut sorted: Vec<&RemoteMove> = moves.iter().collect();
        sorted.sort();

        let mut columns = HashSet::new();
        let mut touched = HashSet::new();
        let mut applied = 0;

        for mv in sorted {
            if mv.project_id != *self.project_id() {
                debug!(task = %mv.task_id, project = %mv.project_id, "move for other project");
                continue;
            }
            if !self.columns().contains(&mv.destination_column) {
                debug!(task = %mv.task_id, column = %mv.destination_column, "move to unknown column");
                continue;
            }
            let Some(task) = self.get(&mv.task_id) else {
                debug!(task = %mv.task_id, "remote move for unknown task");
                continue;
            };
            if !mv.version.supersedes(task.version.as_ref()) {
                debug!(task = %mv.task_id, version = %mv.version, "stale remote move dropped");
                continue;
            }

            columns.insert(task.column_id.clone());
            columns.insert(mv.destination_column.clone());
            touched.insert(mv.task_id.clone());
            self.place(&mv.task_id, mv.destination_column.clone(), mv.position, mv.version);
            applied += 1;
        }

        if !touched.is_empty() {
            self.finish_batch(columns, &touched);
        }
        applied
    }
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
