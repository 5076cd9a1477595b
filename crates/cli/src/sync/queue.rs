// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Offline queue for moves that could not reach the relay.
//!
//! JSONL, one batch of moves per line, fsynced on every write. Batches are
//! flushed in order the next time the relay is reachable.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use kb_core::RemoteMove;

/// Error type for queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type QueueResult<T> = Result<T, QueueError>;

pub struct OfflineQueue {
    path: PathBuf,
}

impl OfflineQueue {
    /// Create or open an offline queue at the given path.
    pub fn open(path: &Path) -> QueueResult<Self> {
        OpenOptions::new().create(true).append(true).open(path)?;
        Ok(OfflineQueue {
            path: path.to_path_buf(),
        })
    }

    /// Persists one batch. Empty batches are not written.
    pub fn enqueue(&mut self, moves: &[RemoteMove]) -> QueueResult<()> {
        if moves.is_empty() {
            return Ok(());
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        writeln!(file, "{}", serde_json::to_string(moves)?)?;
        file.sync_all()?;
        Ok(())
    }

    /// Read all queued batches without removing them.
    pub fn peek_all(&self) -> QueueResult<Vec<Vec<RemoteMove>>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut batches = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            batches.push(serde_json::from_str(&line)?);
        }
        Ok(batches)
    }

    pub fn clear(&mut self) -> QueueResult<()> {
        File::create(&self.path)?;
        Ok(())
    }

    /// Number of queued batches.
    pub fn len(&self) -> QueueResult<usize> {
        Ok(self.peek_all()?.len())
    }

    pub fn is_empty(&self) -> QueueResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Total number of queued moves across batches.
    pub fn move_count(&self) -> QueueResult<usize> {
        Ok(self.peek_all()?.iter().map(Vec::len).sum())
    }

    /// Remove the first `count` batches, keeping the rest in order.
    pub fn remove_first(&mut self, count: usize) -> QueueResult<()> {
        let batches = self.peek_all()?;
        if count >= batches.len() {
            return self.clear();
        }

        let mut file = File::create(&self.path)?;
        for batch in &batches[count..] {
            writeln!(file, "{}", serde_json::to_string(batch)?)?;
        }
        file.sync_all()?;
        Ok(())
    }
}
