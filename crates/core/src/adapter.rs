// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Seams between the board and the outside world.
//!
//! The board never waits on either adapter. Persistence calls are spawned and
//! report back through a completion channel; broadcasts are fire-and-forget.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::db::Database;
use crate::error::Error;
use crate::op::{MoveCommit, RemoteMove, Renumber};

/// Why a move could not be saved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistError {
    /// The backing store no longer knows the task.
    #[error("task not found: {0}")]
    NotFound(String),

    /// The backing store could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backing store refused or failed the write.
    #[error("storage failed: {0}")]
    Failed(String),
}

pub type PersistResult = Result<(), PersistError>;

/// Boxed future returned by [`PersistenceAdapter::commit_move`].
pub type CommitFuture = Pin<Box<dyn Future<Output = PersistResult> + Send + 'static>>;

/// Durable storage for task placements.
///
/// The returned future is spawned, so it must own everything it needs.
pub trait PersistenceAdapter: Send + Sync {
    fn commit_move(&self, commit: MoveCommit) -> CommitFuture;

    /// Saves positions that changed only because a column was renumbered.
    fn commit_positions(&self, renumbers: Vec<Renumber>) -> CommitFuture;
}

/// Announces local moves to other clients.
pub trait BroadcastAdapter: Send + Sync {
    /// Best effort; must not block.
    fn announce_move(&self, mv: RemoteMove);

    /// Announces all moves of one drop.
    fn announce_moves(&self, moves: &[RemoteMove]) {
        for mv in moves {
            self.announce_move(mv.clone());
        }
    }
}

/// Broadcast adapter for boards nobody else is watching.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBroadcast;

impl BroadcastAdapter for NullBroadcast {
    fn announce_move(&self, _mv: RemoteMove) {}
}

/// Persists moves into a shared SQLite [`Database`].
#[derive(Clone)]
pub struct SqlitePersistence {
    db: Arc<Mutex<Database>>,
}

impl SqlitePersistence {
    pub fn new(db: Database) -> Self {
        SqlitePersistence {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Handle to the underlying database, for CRUD writes.
    pub fn database(&self) -> Arc<Mutex<Database>> {
        Arc::clone(&self.db)
    }
}

impl PersistenceAdapter for SqlitePersistence {
    fn commit_move(&self, commit: MoveCommit) -> CommitFuture {
        let db = Arc::clone(&self.db);
        Box::pin(async move {
            let mut db = db.lock().await;
            match db.commit_move(&commit) {
                Ok(true) => Ok(()),
                Ok(false) => {
                    // A newer move is already on disk; nothing left to save.
                    debug!(task = %commit.task_id, version = %commit.version, "commit superseded");
                    Ok(())
                }
                Err(Error::TaskNotFound(id)) => Err(PersistError::NotFound(id)),
                Err(e) => Err(PersistError::Failed(e.to_string())),
            }
        })
    }

    fn commit_positions(&self, renumbers: Vec<Renumber>) -> CommitFuture {
        let db = Arc::clone(&self.db);
        Box::pin(async move {
            let mut db = db.lock().await;
            let updated = db
                .renumber(&renumbers)
                .map_err(|e| PersistError::Failed(e.to_string()))?;
            debug!(updated, requested = renumbers.len(), "positions saved");
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;
