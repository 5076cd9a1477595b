// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use tracing::{debug, warn};

use kb_core::{
    Board, CancelReason, ClockSource, ColumnId, Database, DropTarget, NoOpReason, RemoteMove,
    Reorder, SqlitePersistence, TaskId, TaskStore,
};

use super::{runtime, settle, Workspace};
use crate::cli::MoveTarget;
use crate::error::{Error, Result};
use crate::sync::{Outbox, SyncClient};

pub fn run(id: &str, target: MoveTarget) -> Result<()> {
    let workspace = Workspace::open()?;
    let db = workspace.open_db()?;
    let project = workspace.project();

    let task_id = db.resolve_id(&project, id)?;
    let target = match (target.onto, target.to) {
        (Some(onto), _) => Some(DropTarget::Task(db.resolve_id(&project, &onto)?)),
        (None, Some(to)) => {
            let column = ColumnId::from(to);
            if !workspace.columns.contains(&column) {
                return Err(workspace.columns.not_found(&column).into());
            }
            Some(DropTarget::Column(column))
        }
        (None, None) => None,
    };

    let store = workspace.load_store(&db)?;
    runtime()?.block_on(drag_and_share(&workspace, db, store, task_id, target))
}

async fn drag_and_share(
    workspace: &Workspace,
    db: Database,
    store: TaskStore,
    task_id: TaskId,
    target: Option<DropTarget>,
) -> Result<()> {
    let outbox = Outbox::new();
    let mut board = Board::new(
        store,
        workspace.config.node,
        Arc::new(SqlitePersistence::new(db)),
        Arc::new(outbox.clone()),
    )?;

    match drop_task(&mut board, task_id.clone(), target)? {
        Reorder::Move(plan) => {
            let column = workspace
                .columns
                .get(&plan.to_column)
                .map(|c| c.name.as_str())
                .unwrap_or(plan.to_column.as_str());
            println!(
                "Moved {} to {} at position {}",
                plan.task_id, column, plan.position
            );
            let displaced = plan.moves.len().saturating_sub(1);
            if displaced > 0 {
                println!("  {} other task(s) repositioned", displaced);
            }
        }
        Reorder::NoOp(NoOpReason::SelfDrop) => {
            println!("{} dropped onto itself, nothing to do", task_id)
        }
        Reorder::NoOp(NoOpReason::Unchanged) => println!("{} is already there", task_id),
        Reorder::Cancelled(reason) => return Err(Error::MoveCancelled(describe_cancel(&reason))),
    }

    share(workspace, &mut board, outbox.take()).await?;
    settle(&mut board).await;
    Ok(())
}

/// Runs one drag from start to drop.
pub(crate) fn drop_task<C: ClockSource>(
    board: &mut Board<C>,
    task_id: TaskId,
    target: Option<DropTarget>,
) -> Result<Reorder> {
    if !board.drag_start(task_id.clone())? {
        return Err(Error::TaskNotFound(task_id.to_string()));
    }
    board.drag_over(target.clone());
    Ok(board.drag_end(target)?)
}

pub(crate) fn describe_cancel(reason: &CancelReason) -> String {
    match reason {
        CancelReason::NoTarget => "no drop target".to_string(),
        CancelReason::TaskGone => "the task no longer exists".to_string(),
        CancelReason::UnknownColumn(column) => format!("unknown column {}", column),
        CancelReason::TargetGone(task) => format!("target task {} no longer exists", task),
    }
}

/// Sends the drop's moves to the relay, or queues them when it is out of reach.
async fn share<C: ClockSource>(
    workspace: &Workspace,
    board: &mut Board<C>,
    moves: Vec<RemoteMove>,
) -> Result<()> {
    let Some(config) = workspace.sync_config() else {
        return Ok(());
    };
    if moves.is_empty() {
        return Ok(());
    }

    let mut client = SyncClient::new(config, &workspace.queue_path())?;
    if let Err(e) = client.connect_with_retry().await {
        warn!(error = %e, "relay unreachable, queueing moves");
        client.send_moves(moves).await?;
        eprintln!(
            "warning: relay unreachable, {} move(s) queued for 'kb sync'",
            client.pending_moves()?
        );
        return Ok(());
    }

    if let Err(e) = client.flush_queue().await {
        warn!(error = %e, "could not flush queued moves");
    }
    if !client.send_moves(moves).await? {
        eprintln!("warning: lost the relay, moves queued for 'kb sync'");
        return Ok(());
    }

    match client.confirm().await {
        Ok(inbox) => {
            for message in inbox.errors {
                board.report_remote_error(message);
            }
            let applied = board.apply_remote(&inbox.relayed);
            debug!(applied, "applied moves relayed during send");
        }
        Err(e) => warn!(error = %e, "relay did not confirm the moves"),
    }
    client.disconnect().await?;
    Ok(())
}

#[cfg(test)]
#[path = "move_tests.rs"]
mod tests;
