// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

use kb_core::{RemoteMove, Stamp};

/// A move of `task` in project `web` into `to`, stamped at `wall_ms`.
pub fn make_move(task: &str, to: &str, wall_ms: u64) -> RemoteMove {
    RemoteMove {
        version: Stamp::new(wall_ms, 0, 9),
        task_id: task.into(),
        project_id: "web".into(),
        source_column: "todo".into(),
        destination_column: to.into(),
        position: 0,
    }
}
