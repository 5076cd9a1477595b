// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Drag session state machine.
//!
//! ```text
//!          start(task)            over(target)*           end(target)
//!   Idle ──────────────► Dragging ─────────────► Dragging ─────────────► Idle
//!     ▲                      │                                            │
//!     └──────── cancel / dragged task deleted ─────────────────────────────┘
//! ```
//!
//! The controller never touches the store. `end` always returns to `Idle`,
//! whatever the reorder outcome, and hands the caller a [`DragEnd`] to apply.

use tracing::debug;

use crate::error::{Error, Result};
use crate::reorder::{self, CancelReason, DropTarget, Reorder};
use crate::store::TaskStore;
use crate::task::{ColumnId, TaskId};

/// An in-progress drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub task_id: TaskId,
    pub origin_column: ColumnId,
    pub hover: Option<DropTarget>,
    /// Column of the most recent hover target, kept in case the hovered task
    /// is deleted before the drop.
    pub hover_column: Option<ColumnId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Result of ending a drag.
pub type DragEnd = Reorder;

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The task being dragged, if any.
    pub fn dragged(&self) -> Option<&TaskId> {
        match &self.state {
            DragState::Dragging(session) => Some(&session.task_id),
            DragState::Idle => None,
        }
    }

    /// Begins dragging `task_id`.
    ///
    /// Returns `Ok(false)` and stays idle when the task is unknown. Starting
    /// while another drag is active is a caller bug.
    pub fn start(&mut self, store: &TaskStore, task_id: TaskId) -> Result<bool> {
        if let DragState::Dragging(session) = &self.state {
            return Err(Error::DragInProgress(session.task_id.to_string()));
        }
        let Some(task) = store.get(&task_id) else {
            debug!(task = %task_id, "drag start on unknown task ignored");
            return Ok(false);
        };

        self.state = DragState::Dragging(DragSession {
            origin_column: task.column_id.clone(),
            task_id,
            hover: None,
            hover_column: None,
        });
        Ok(true)
    }

    /// Records the current hover target. No-op when idle.
    ///
    /// Also remembers the column under the pointer: the target column, or the
    /// target task's current column. A later hover with no known column keeps
    /// the previous one, so a drop on a task that vanished can still land in
    /// its column. Cancels the drag if the dragged task has been deleted
    /// meanwhile.
    pub fn over(&mut self, store: &TaskStore, target: Option<DropTarget>) {
        let DragState::Dragging(session) = &mut self.state else {
            return;
        };
        if !store.contains(&session.task_id) {
            debug!(task = %session.task_id, "dragged task vanished, cancelling drag");
            self.state = DragState::Idle;
            return;
        }

        let column = match &target {
            Some(DropTarget::Column(column)) => Some(column.clone()),
            Some(DropTarget::Task(id)) => store.get(id).map(|t| t.column_id.clone()),
            None => None,
        };
        if column.is_some() {
            session.hover_column = column;
        }
        session.hover = target;
    }

    /// Ends the drag at `target` and returns the reorder to apply.
    ///
    /// The controller is idle afterwards in every case.
    pub fn end(&mut self, store: &TaskStore, target: Option<DropTarget>) -> Result<DragEnd> {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return Err(Error::NotDragging);
        };

        let Some(target) = target else {
            return Ok(Reorder::Cancelled(CancelReason::NoTarget));
        };

        // The hovered task's column, only trusted when it was recorded for this target.
        let fallback = match (&target, &session.hover) {
            (DropTarget::Task(_), Some(hover)) if *hover == target => session.hover_column.as_ref(),
            _ => None,
        };

        Ok(reorder::plan(store, &session.task_id, &target, fallback))
    }

    /// Abandons the current drag, if any.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Cancels the drag when `task_id` is the task being dragged.
    ///
    /// Returns true if a drag was cancelled.
    pub fn forget_task(&mut self, task_id: &TaskId) -> bool {
        if self.dragged() == Some(task_id) {
            self.state = DragState::Idle;
            return true;
        }
        false
    }
}

#[cfg(test)]
#[path = "drag_tests.rs"]
mod tests;
