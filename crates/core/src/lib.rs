// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! kb-core: drag-and-drop reordering core for kanban boards
//!
//! This crate provides the task store, the reordering algorithm, the drag
//! session controller and the board orchestrator, plus the storage and wire
//! types shared by the kb CLI and the kb-remote relay.

pub mod adapter;
pub mod board;
pub mod column;
pub mod db;
pub mod drag;
pub mod error;
pub mod merge;
pub mod op;
pub mod protocol;
pub mod reorder;
pub mod stamp;
pub mod store;
pub mod task;

#[cfg(test)]
mod test_helpers;

pub use adapter::{
    BroadcastAdapter, CommitFuture, NullBroadcast, PersistError, PersistenceAdapter,
    SqlitePersistence,
};
pub use board::{Board, Completion, Notice};
pub use column::{Column, ColumnSet};
pub use db::Database;
pub use drag::{DragController, DragSession, DragState};
pub use error::{Error, Result};
pub use merge::Merge;
pub use op::{MoveCommit, RemoteMove, Renumber};
pub use reorder::{CancelReason, DropTarget, MovePlan, NoOpReason, Reorder, TaskMoved};
pub use stamp::{ClockSource, Stamp, StampClock, SystemClock};
pub use store::TaskStore;
pub use task::{ColumnId, Priority, ProjectId, Task, TaskId, TaskPayload, TaskSummary};
