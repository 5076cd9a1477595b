// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One client's live board.
//!
//! [`Board`] ties the store, the drag controller and the two adapters
//! together. A drop is applied to the store before anything leaves the
//! process; persistence runs in the background and reports back through
//! [`Board::drain_completions`] or [`Board::settle`]. Failed saves surface as
//! [`Notice`]s and never roll the board back.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::adapter::{BroadcastAdapter, PersistResult, PersistenceAdapter};
use crate::drag::{DragController, DragState};
use crate::error::{Error, Result};
use crate::merge::Merge;
use crate::op::{MoveCommit, RemoteMove, Renumber};
use crate::reorder::{DropTarget, MovePlan, Reorder};
use crate::stamp::{ClockSource, Stamp, StampClock, SystemClock};
use crate::store::TaskStore;
use crate::task::{ColumnId, Task, TaskId, TaskPayload};

/// Outcome of one background save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub task_id: TaskId,
    pub version: Stamp,
    pub result: PersistResult,
}

/// Something the user should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The latest move of this task may not have been saved.
    MaybeNotSaved { task_id: TaskId, reason: String },
    /// The relay refused something this client sent.
    RemoteRejected { message: String },
    /// Positions of tasks shifted by a renumbered column may not have been saved.
    OrderNotSaved { reason: String },
}

enum Ack {
    Move(Completion),
    Positions(PersistResult),
}

pub struct Board<C: ClockSource = SystemClock> {
    store: TaskStore,
    drag: DragController,
    clock: StampClock<C>,
    persistence: Arc<dyn PersistenceAdapter>,
    broadcast: Arc<dyn BroadcastAdapter>,
    runtime: Handle,
    // Latest unacknowledged move version per task.
    unsaved: HashMap<TaskId, Stamp>,
    // Position-only saves still in flight.
    renumbering: usize,
    completions_tx: mpsc::UnboundedSender<Ack>,
    completions_rx: mpsc::UnboundedReceiver<Ack>,
    notices: Vec<Notice>,
}

impl Board<SystemClock> {
    /// Creates a board on the current tokio runtime.
    pub fn new(
        store: TaskStore,
        node: u32,
        persistence: Arc<dyn PersistenceAdapter>,
        broadcast: Arc<dyn BroadcastAdapter>,
    ) -> Result<Self> {
        Self::with_clock(store, StampClock::new(node), persistence, broadcast)
    }
}

impl<C: ClockSource> Board<C> {
    pub fn with_clock(
        mut store: TaskStore,
        clock: StampClock<C>,
        persistence: Arc<dyn PersistenceAdapter>,
        broadcast: Arc<dyn BroadcastAdapter>,
    ) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| Error::NoRuntime(e.to_string()))?;

        // Local moves must sort after anything already stored.
        for version in store.tasks().filter_map(|t| t.version.as_ref()) {
            clock.observe(version);
        }

        let renumbered = store.take_renumbered();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let mut board = Board {
            store,
            drag: DragController::new(),
            clock,
            persistence,
            broadcast,
            runtime,
            unsaved: HashMap::new(),
            renumbering: 0,
            completions_tx,
            completions_rx,
            notices: Vec::new(),
        };
        // Gaps closed while loading are written back so the next load agrees.
        board.persist_positions(renumbered);
        Ok(board)
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn drag_start(&mut self, task_id: TaskId) -> Result<bool> {
        self.drag.start(&self.store, task_id)
    }

    pub fn drag_over(&mut self, target: Option<DropTarget>) {
        self.drag.over(&self.store, target);
    }

    pub fn drag_cancel(&mut self) {
        self.drag.cancel();
    }

    /// Ends the drag and, for a real move, applies and publishes it.
    pub fn drag_end(&mut self, target: Option<DropTarget>) -> Result<Reorder> {
        let outcome = self.drag.end(&self.store, target)?;
        match &outcome {
            Reorder::Move(plan) => self.commit_plan(plan)?,
            Reorder::NoOp(reason) => debug!(?reason, "drop changed nothing"),
            Reorder::Cancelled(reason) => debug!(?reason, "drop cancelled"),
        }
        Ok(outcome)
    }

    fn commit_plan(&mut self, plan: &MovePlan) -> Result<()> {
        let version = self.clock.tick();
        self.store.apply_plan(plan, version)?;

        let project = self.store.project_id().clone();
        let moves: Vec<RemoteMove> = plan
            .moves
            .iter()
            .map(|moved| RemoteMove::from_moved(moved, &project, version))
            .collect();
        for mv in &moves {
            self.unsaved.insert(mv.task_id.clone(), version);
            self.persist(mv.commit());
        }
        self.broadcast.announce_moves(&moves);

        info!(
            task = %plan.task_id,
            to = %plan.to_column,
            position = plan.position,
            %version,
            "task moved"
        );
        Ok(())
    }

    fn persist(&self, commit: MoveCommit) {
        let future = self.persistence.commit_move(commit.clone());
        let tx = self.completions_tx.clone();
        self.runtime.spawn(async move {
            let result = future.await;
            if let Err(e) = &result {
                warn!(task = %commit.task_id, version = %commit.version, error = %e, "move not saved");
            }
            // The board may be gone; nobody is left to tell.
            let _ = tx.send(Ack::Move(Completion {
                task_id: commit.task_id,
                version: commit.version,
                result,
            }));
        });
    }

    /// Column and position of every task currently in `columns`.
    fn positions_in<'a>(
        &self,
        columns: impl IntoIterator<Item = &'a ColumnId>,
    ) -> HashMap<TaskId, (ColumnId, u32)> {
        let mut positions = HashMap::new();
        for column in columns {
            for task in self.store.list_by_column(column) {
                positions.insert(task.id.clone(), (task.column_id.clone(), task.position));
            }
        }
        positions
    }

    /// Saves the new position of every task in `before` that stayed in its
    /// column but changed position, except those in `committed`.
    fn persist_renumbering(
        &mut self,
        before: HashMap<TaskId, (ColumnId, u32)>,
        committed: &HashSet<TaskId>,
    ) {
        let mut renumbers: Vec<Renumber> = before
            .into_iter()
            .filter(|(id, _)| !committed.contains(id))
            .filter_map(|(id, (column, position))| {
                let task = self.store.get(&id)?;
                (task.column_id == column && task.position != position).then(|| Renumber {
                    task_id: id,
                    column_id: column,
                    position: task.position,
                    version: task.version,
                })
            })
            .collect();
        renumbers.sort_by(|a, b| (&a.column_id, a.position).cmp(&(&b.column_id, b.position)));
        self.persist_positions(renumbers);
    }

    fn persist_positions(&mut self, renumbers: Vec<Renumber>) {
        if renumbers.is_empty() {
            return;
        }
        let count = renumbers.len();
        let future = self.persistence.commit_positions(renumbers);
        let tx = self.completions_tx.clone();
        self.renumbering += 1;
        self.runtime.spawn(async move {
            let result = future.await;
            if let Err(e) = &result {
                warn!(count, error = %e, "positions not saved");
            }
            let _ = tx.send(Ack::Positions(result));
        });
    }

    /// Applies moves made by other clients. Returns how many were accepted.
    ///
    /// An active drag is left alone, even when its task moved.
    pub fn apply_remote(&mut self, moves: &[RemoteMove]) -> usize {
        let mut columns: HashSet<ColumnId> = HashSet::new();
        for mv in moves {
            self.clock.observe(&mv.version);
            columns.insert(mv.destination_column.clone());
            if let Some(task) = self.store.get(&mv.task_id) {
                columns.insert(task.column_id.clone());
            }
        }
        let before = self.positions_in(&columns);
        let applied = self.store.apply_remote(moves);
        if applied == 0 {
            return 0;
        }

        let mut committed = HashSet::new();
        for mv in moves {
            let Some(task) = self.store.get(&mv.task_id) else {
                continue;
            };
            if task.version != Some(mv.version) {
                continue;
            }
            // Newest version of this task, so any local save still pending is stale.
            self.unsaved.insert(mv.task_id.clone(), mv.version);
            committed.insert(mv.task_id.clone());
            let commit = MoveCommit {
                task_id: task.id.clone(),
                project_id: task.project_id.clone(),
                column_id: task.column_id.clone(),
                position: task.position,
                version: mv.version,
            };
            self.persist(commit);
        }
        // Bystanders shifted by the merge carry no remote stamp of their own.
        self.persist_renumbering(before, &committed);
        debug!(applied, received = moves.len(), "applied remote moves");
        applied
    }

    pub fn create_task(&mut self, task: Task) -> Result<&Task> {
        self.store.insert(task)
    }

    pub fn edit_task(&mut self, id: &TaskId, payload: TaskPayload) -> Result<()> {
        self.store.update_payload(id, payload)
    }

    /// Deletes a task, cancelling the drag if it was the one being dragged.
    ///
    /// The tasks below it move up one; their new positions are saved.
    pub fn delete_task(&mut self, id: &TaskId) -> Option<Task> {
        if self.drag.forget_task(id) {
            debug!(task = %id, "dragged task deleted, drag cancelled");
        }
        self.unsaved.remove(id);
        let column = self.store.get(id)?.column_id.clone();
        let before = self.positions_in([&column]);
        let removed = self.store.remove(id)?;
        self.persist_renumbering(before, &HashSet::new());
        Some(removed)
    }

    /// Records a save result. Returns false when it was stale and ignored.
    pub fn handle_completion(&mut self, completion: Completion) -> bool {
        if self.unsaved.get(&completion.task_id) != Some(&completion.version) {
            debug!(
                task = %completion.task_id,
                version = %completion.version,
                "stale completion discarded"
            );
            return false;
        }
        self.unsaved.remove(&completion.task_id);
        if let Err(e) = completion.result {
            self.notices.push(Notice::MaybeNotSaved {
                task_id: completion.task_id,
                reason: e.to_string(),
            });
        }
        true
    }

    fn handle_ack(&mut self, ack: Ack) -> bool {
        match ack {
            Ack::Move(completion) => self.handle_completion(completion),
            Ack::Positions(result) => {
                self.renumbering = self.renumbering.saturating_sub(1);
                if let Err(e) = result {
                    self.notices.push(Notice::OrderNotSaved {
                        reason: e.to_string(),
                    });
                }
                true
            }
        }
    }

    /// Handles every save result that has already arrived, without waiting.
    pub fn drain_completions(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(ack) = self.completions_rx.try_recv() {
            if self.handle_ack(ack) {
                handled += 1;
            }
        }
        handled
    }

    /// Waits until every change applied to the store has been acknowledged.
    ///
    /// Never returns if the persistence adapter never answers; callers that
    /// care should wrap it in a timeout.
    pub async fn settle(&mut self) {
        while !self.unsaved.is_empty() || self.renumbering > 0 {
            match self.completions_rx.recv().await {
                Some(ack) => {
                    self.handle_ack(ack);
                }
                None => break,
            }
        }
    }

    pub fn report_remote_error(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::RemoteRejected {
            message: message.into(),
        });
    }

    /// Takes the pending notices.
    pub fn notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Tasks whose latest move has not been acknowledged yet.
    pub fn unsaved(&self) -> Vec<&TaskId> {
        let mut ids: Vec<&TaskId> = self.unsaved.keys().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
