// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reordering rules for a finished drag.
//!
//! [`plan`] is a pure function of the store snapshot: it never mutates
//! anything and never fails. Conditions a user can produce by dragging (a
//! self drop, a stale column id, a card deleted mid-gesture) come back as
//! [`Reorder::NoOp`] or [`Reorder::Cancelled`].
//!
//! Rules:
//! - Drop on a column: the task goes last in that column.
//! - Drop on a task in the same column: the task is pulled out and put back
//!   immediately before the target.
//! - Drop on a task in another column: the task takes the target's position;
//!   the target and everything after it shift down by one.
//! - Drop on a task that has since been deleted: treated as a drop on the
//!   column that task was last seen in, if known; cancelled otherwise.
//!
//! Both columns are renumbered densely and only tasks whose column or
//! position actually changes end up in [`MovePlan::moves`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::TaskStore;
use crate::task::{ColumnId, TaskId};

/// What the pointer was over when the drag ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DropTarget {
    Column(ColumnId),
    Task(TaskId),
}

/// One task's change of placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMoved {
    pub task_id: TaskId,
    pub from_column: ColumnId,
    pub from_position: u32,
    pub column_id: ColumnId,
    pub position: u32,
}

/// The full effect of dropping a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    /// The dragged task.
    pub task_id: TaskId,
    pub from_column: ColumnId,
    pub to_column: ColumnId,
    /// The dragged task's new position.
    pub position: u32,
    /// The dragged task first (when it changed), then displaced tasks in column order.
    pub moves: Vec<TaskMoved>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// Dropped onto itself.
    SelfDrop,
    /// The drop would leave every task where it is.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    /// Dropped outside any target.
    NoTarget,
    /// The dragged task no longer exists.
    TaskGone,
    /// The destination column is not on this board.
    UnknownColumn(ColumnId),
    /// The hovered task no longer exists and its column is unknown.
    TargetGone(TaskId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reorder {
    Move(MovePlan),
    NoOp(NoOpReason),
    Cancelled(CancelReason),
}

/// Computes the effect of dropping `task_id` on `target`.
///
/// `fallback` is the column the hovered task was last seen in; it is used
/// only when that task has disappeared.
pub fn plan(
    store: &TaskStore,
    task_id: &TaskId,
    target: &DropTarget,
    fallback: Option<&ColumnId>,
) -> Reorder {
    let Some(dragged) = store.get(task_id) else {
        return Reorder::Cancelled(CancelReason::TaskGone);
    };

    let (dest, anchor) = match target {
        DropTarget::Column(column) => (column, None),
        DropTarget::Task(id) if id == task_id => return Reorder::NoOp(NoOpReason::SelfDrop),
        DropTarget::Task(id) => match (store.get(id), fallback) {
            (Some(hovered), _) => (&hovered.column_id, Some(id)),
            (None, Some(column)) => {
                debug!(
                    task = %task_id,
                    target = %id,
                    column = %column,
                    "drop target vanished, using its column"
                );
                (column, None)
            }
            (None, None) => return Reorder::Cancelled(CancelReason::TargetGone(id.clone())),
        },
    };

    if !store.columns().contains(dest) {
        return Reorder::Cancelled(CancelReason::UnknownColumn(dest.clone()));
    }

    let mut dest_ids: Vec<&TaskId> = store
        .column_order(dest)
        .iter()
        .filter(|id| *id != task_id)
        .collect();
    let index = anchor
        .and_then(|a| dest_ids.iter().position(|id| *id == a))
        .unwrap_or(dest_ids.len());
    dest_ids.insert(index, task_id);

    let mut moves = Vec::new();
    let position = index as u32;
    if dragged.column_id != *dest || dragged.position != position {
        moves.push(TaskMoved {
            task_id: task_id.clone(),
            from_column: dragged.column_id.clone(),
            from_position: dragged.position,
            column_id: dest.clone(),
            position,
        });
    }

    let displaced = dest_ids.into_iter().filter(|id| *id != task_id);
    collect_shifts(store, dest, displaced, &mut moves, Some(index));
    if dragged.column_id != *dest {
        let source_ids = store
            .column_order(&dragged.column_id)
            .iter()
            .filter(|id| *id != task_id);
        collect_shifts(store, &dragged.column_id, source_ids, &mut moves, None);
    }

    if moves.is_empty() {
        return Reorder::NoOp(NoOpReason::Unchanged);
    }

    Reorder::Move(MovePlan {
        task_id: task_id.clone(),
        from_column: dragged.column_id.clone(),
        to_column: dest.clone(),
        position,
        moves,
    })
}

/// Appends a move for each task in `ids` whose dense index differs from its position.
///
/// `gap` is the index occupied by the dragged task, skipped while numbering.
fn collect_shifts<'a>(
    store: &TaskStore,
    column: &ColumnId,
    ids: impl Iterator<Item = &'a TaskId>,
    moves: &mut Vec<TaskMoved>,
    gap: Option<usize>,
) {
    let mut index = 0;
    for id in ids {
        if Some(index) == gap {
            index += 1;
        }
        if let Some(task) = store.get(id) {
            let position = index as u32;
            if task.position != position || task.column_id != *column {
                moves.push(TaskMoved {
                    task_id: id.clone(),
                    from_column: task.column_id.clone(),
                    from_position: task.position,
                    column_id: column.clone(),
                    position,
                });
            }
        }
        index += 1;
    }
}

#[cfg(test)]
#[path = "reorder_tests.rs"]
mod tests;
