// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server state management.
//!
//! Wraps the placement database and the relay channel for shared access.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::debug;

use kb_core::{Database, ProjectId, RemoteMove, Result};

/// Accepted moves of one client, on their way to the others.
#[derive(Debug, Clone)]
pub struct Relayed {
    /// Connection that sent the moves; it already has them.
    pub origin: u64,
    pub project_id: ProjectId,
    pub moves: Vec<RemoteMove>,
}

/// Shared server state containing the placement database.
#[derive(Clone)]
pub struct ServerState {
    inner: Arc<ServerStateInner>,
}

struct ServerStateInner {
    db: Mutex<Database>,
    relay_tx: broadcast::Sender<Relayed>,
    next_connection: AtomicU64,
}

impl ServerState {
    /// Opens (or creates) `board.db` in the given directory.
    pub fn new(data_dir: &Path) -> Result<Self> {
        let db = Database::open(&data_dir.join("board.db"))?;
        let (relay_tx, _) = broadcast::channel(1024);

        Ok(ServerState {
            inner: Arc::new(ServerStateInner {
                db: Mutex::new(db),
                relay_tx,
                next_connection: AtomicU64::new(1),
            }),
        })
    }

    /// Allocates an id for a new connection.
    pub fn connection_id(&self) -> u64 {
        self.inner.next_connection.fetch_add(1, Ordering::Relaxed)
    }

    /// Records moves for `project_id` and relays the ones that were newer
    /// than what the server already had.
    ///
    /// Returns the accepted moves.
    pub async fn record_moves(
        &self,
        origin: u64,
        project_id: &ProjectId,
        moves: Vec<RemoteMove>,
    ) -> Result<Vec<RemoteMove>> {
        let mut accepted = Vec::with_capacity(moves.len());
        {
            let mut db = self.inner.db.lock().await;
            for mv in moves {
                if db.record_placement(&mv)? {
                    accepted.push(mv);
                } else {
                    debug!(task = %mv.task_id, version = %mv.version, "stale move dropped");
                }
            }
        }

        if !accepted.is_empty() {
            // No receivers just means nobody else is watching.
            let _ = self.inner.relay_tx.send(Relayed {
                origin,
                project_id: project_id.clone(),
                moves: accepted.clone(),
            });
        }
        Ok(accepted)
    }

    /// Latest placement of every task in a project.
    pub async fn snapshot(&self, project_id: &ProjectId) -> Result<Vec<RemoteMove>> {
        let db = self.inner.db.lock().await;
        db.placements(project_id)
    }

    /// Subscribe to relayed moves.
    pub fn subscribe(&self) -> broadcast::Receiver<Relayed> {
        self.inner.relay_tx.subscribe()
    }
}
