// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Broadcast adapter that holds announced moves until they can be sent.
//!
//! The board announces synchronously from inside a drop; the relay
//! connection is async. The command collects a drop's moves here and hands
//! them to the [`SyncClient`](super::SyncClient) once the drop is done.

use std::sync::{Arc, Mutex};

use tracing::warn;

use kb_core::{BroadcastAdapter, RemoteMove};

#[derive(Debug, Clone, Default)]
pub struct Outbox {
    moves: Arc<Mutex<Vec<RemoteMove>>>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes everything announced so far, oldest first.
    pub fn take(&self) -> Vec<RemoteMove> {
        match self.moves.lock() {
            Ok(mut moves) => std::mem::take(&mut *moves),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl BroadcastAdapter for Outbox {
    fn announce_move(&self, mv: RemoteMove) {
        match self.moves.lock() {
            Ok(mut moves) => moves.push(mv),
            Err(_) => warn!(task = %mv.task_id, "outbox poisoned, move not announced"),
        }
    }
}
