// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use tracing::debug;

use kb_core::{Board, NullBroadcast, SqlitePersistence};

use super::{runtime, settle, Workspace};
use crate::error::{Error, Result};

pub fn run(id: &str) -> Result<()> {
    let workspace = Workspace::open()?;
    let db = workspace.open_db()?;
    let task_id = db.resolve_id(&workspace.project(), id)?;
    let store = workspace.load_store(&db)?;

    if !db.delete_task(&task_id)? {
        return Err(Error::TaskNotFound(task_id.to_string()));
    }
    debug!(task = %task_id, "task deleted");

    // The tasks below it move up; the board saves their new positions.
    runtime()?.block_on(async {
        let mut board = Board::new(
            store,
            workspace.config.node,
            Arc::new(SqlitePersistence::new(db)),
            Arc::new(NullBroadcast),
        )?;
        board.delete_task(&task_id);
        settle(&mut board).await;
        Ok::<(), Error>(())
    })?;

    println!("Deleted {}", task_id);
    Ok(())
}
