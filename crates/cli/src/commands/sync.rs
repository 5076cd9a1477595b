// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use tracing::info;

use kb_core::{Board, ClockSource, NullBroadcast, SqlitePersistence};

use super::{runtime, settle, Workspace};
use crate::error::{Error, Result};
use crate::sync::{SyncClient, Transport};

/// What one exchange with the relay did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Queued moves sent to the relay.
    pub sent: usize,
    /// Moves received, from the snapshot and relayed live.
    pub received: usize,
    /// Received moves that changed the local board.
    pub applied: usize,
    /// Messages the relay rejected.
    pub rejected: usize,
}

pub fn run() -> Result<()> {
    let workspace = Workspace::open()?;
    let config = workspace.sync_config().ok_or(Error::NoRemote)?;
    let db = workspace.open_db()?;
    let store = workspace.load_store(&db)?;

    runtime()?.block_on(async {
        let mut board = Board::new(
            store,
            workspace.config.node,
            Arc::new(SqlitePersistence::new(db)),
            Arc::new(NullBroadcast),
        )?;
        let mut client = SyncClient::new(config, &workspace.queue_path())?;
        client.connect_with_retry().await?;
        let report = sync_board(&mut client, &mut board).await?;
        client.disconnect().await?;

        println!(
            "Synced: {} sent, {} received, {} applied",
            report.sent, report.received, report.applied
        );
        if report.rejected > 0 {
            println!("{} rejected by the relay", report.rejected);
        }
        Ok::<(), Error>(())
    })
}

/// Pushes queued moves, then pulls the relay's placements into `board`.
pub(crate) async fn sync_board<T: Transport, C: ClockSource>(
    client: &mut SyncClient<T>,
    board: &mut Board<C>,
) -> Result<SyncReport> {
    let sent = client.flush_queue().await?;
    let inbox = client.fetch_snapshot().await?;

    let rejected = inbox.errors.len();
    for message in inbox.errors {
        board.report_remote_error(message);
    }

    let received = inbox.relayed.len() + inbox.placements.len();
    let applied = board.apply_remote(&inbox.relayed) + board.apply_remote(&inbox.placements);
    settle(board).await;

    info!(sent, received, applied, rejected, "sync complete");
    Ok(SyncReport {
        sent,
        received,
        applied,
        rejected,
    })
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
