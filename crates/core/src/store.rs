// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The authoritative in-memory copy of one board.
//!
//! [`TaskStore`] keeps every task of a project plus an index of each column's
//! tasks in display order. Every public mutation finishes its whole update
//! (placement, renumbering, index rebuild) before bumping the revision that
//! subscribers watch, so a renderer never sees a half-applied move.
//!
//! Positions inside a column are always dense: `0..n` in display order.
//! Mutations that place a task on an occupied position push the occupant and
//! everything after it down by one.

use std::collections::{BTreeMap, HashMap, HashSet};

use tokio::sync::watch;
use tracing::debug;

use crate::column::ColumnSet;
use crate::error::{Error, Result};
use crate::op::Renumber;
use crate::reorder::MovePlan;
use crate::stamp::Stamp;
use crate::task::{ColumnId, ProjectId, Task, TaskId, TaskPayload, TaskSummary};

pub struct TaskStore {
    project_id: ProjectId,
    columns: ColumnSet,
    tasks: HashMap<TaskId, Task>,
    order: BTreeMap<ColumnId, Vec<TaskId>>,
    next_seq: u64,
    revision: watch::Sender<u64>,
    // Positions changed while loading, not yet written back.
    renumbered: Vec<Renumber>,
}

impl TaskStore {
    /// Creates an empty board.
    pub fn new(project_id: impl Into<ProjectId>, columns: ColumnSet) -> Self {
        let order = columns.ids().map(|id| (id.clone(), Vec::new())).collect();
        let (revision, _) = watch::channel(0);
        TaskStore {
            project_id: project_id.into(),
            columns,
            tasks: HashMap::new(),
            order,
            next_seq: 0,
            revision,
            renumbered: Vec::new(),
        }
    }

    /// Creates a board from previously stored tasks.
    ///
    /// Stored positions, insertion order and versions are kept; each column is
    /// then renumbered densely in `(position, seq)` order. Tasks whose position
    /// changed are reported by [`TaskStore::take_renumbered`].
    pub fn load(
        project_id: impl Into<ProjectId>,
        columns: ColumnSet,
        tasks: impl IntoIterator<Item = Task>,
    ) -> Result<Self> {
        let mut store = Self::new(project_id, columns);
        let mut stored = HashMap::new();
        for task in tasks {
            if !store.columns.contains(&task.column_id) {
                return Err(store.columns.not_found(&task.column_id));
            }
            if store.tasks.contains_key(&task.id) {
                return Err(Error::DuplicateTask(task.id.to_string()));
            }
            store.next_seq = store.next_seq.max(task.seq + 1);
            stored.insert(task.id.clone(), task.position);
            store.tasks.insert(task.id.clone(), task);
        }
        let all: Vec<ColumnId> = store.columns.ids().cloned().collect();
        store.reindex(all, &HashSet::new());

        let mut renumbered: Vec<Renumber> = store
            .tasks
            .values()
            .filter(|t| stored.get(&t.id) != Some(&t.position))
            .map(|t| Renumber {
                task_id: t.id.clone(),
                column_id: t.column_id.clone(),
                position: t.position,
                version: t.version,
            })
            .collect();
        renumbered.sort_by(|a, b| (&a.column_id, a.position).cmp(&(&b.column_id, b.position)));
        if !renumbered.is_empty() {
            debug!(count = renumbered.len(), "stored positions had gaps");
        }
        store.renumbered = renumbered;
        Ok(store)
    }

    /// Takes the positions [`TaskStore::load`] had to change.
    pub fn take_renumbered(&mut self) -> Vec<Renumber> {
        std::mem::take(&mut self.renumbered)
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn contains(&self, id: &TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Every task, in no particular order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Tasks of a column ordered by position. Unknown columns are empty.
    pub fn list_by_column(&self, column: &ColumnId) -> Vec<&Task> {
        self.order
            .get(column)
            .map(|ids| ids.iter().filter_map(|id| self.tasks.get(id)).collect())
            .unwrap_or_default()
    }

    /// Ids of a column's tasks in display order.
    pub fn column_order(&self, column: &ColumnId) -> &[TaskId] {
        self.order.get(column).map(Vec::as_slice).unwrap_or_default()
    }

    /// Card data for a column, in display order.
    pub fn column_view(&self, column: &ColumnId) -> Vec<TaskSummary> {
        self.list_by_column(column)
            .into_iter()
            .map(Task::summary)
            .collect()
    }

    /// Bumped once per completed mutation.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Adds a new task at the end of its column.
    pub fn insert(&mut self, mut task: Task) -> Result<&Task> {
        if !self.columns.contains(&task.column_id) {
            return Err(self.columns.not_found(&task.column_id));
        }
        if self.tasks.contains_key(&task.id) {
            return Err(Error::DuplicateTask(task.id.to_string()));
        }

        task.seq = self.next_seq;
        self.next_seq += 1;
        task.position = self.column_order(&task.column_id).len() as u32;

        let id = task.id.clone();
        if let Some(ids) = self.order.get_mut(&task.column_id) {
            ids.push(id.clone());
        }
        self.tasks.insert(id.clone(), task);
        self.bump();

        self.tasks
            .get(&id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }

    /// Replaces the CRUD-owned fields of a task.
    pub fn update_payload(&mut self, id: &TaskId, payload: TaskPayload) -> Result<()> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        task.payload = payload;
        self.bump();
        Ok(())
    }

    /// Deletes a task and closes the gap it leaves.
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let task = self.tasks.remove(id)?;
        self.reindex([task.column_id.clone()], &HashSet::new());
        self.bump();
        Some(task)
    }

    /// Places one task at `position` in `column`, shifting occupants down.
    ///
    /// `position` is the task's index once placed; past the end appends.
    pub fn apply_move(&mut self, id: &TaskId, column: ColumnId, position: u32) -> Result<()> {
        if !self.columns.contains(&column) {
            return Err(self.columns.not_found(&column));
        }
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        let from = std::mem::replace(&mut task.column_id, column.clone());

        if let Some(ids) = self.order.get_mut(&from) {
            ids.retain(|other| other != id);
        }
        let ids = self.order.entry(column.clone()).or_default();
        let index = (position as usize).min(ids.len());
        ids.insert(index, id.clone());

        self.renumber([from, column]);
        self.bump();
        Ok(())
    }

    /// Sets positions of several tasks at once, then renumbers their columns.
    pub fn apply_bulk_reposition(&mut self, moves: &[(TaskId, u32)]) -> Result<()> {
        if let Some((missing, _)) = moves.iter().find(|(id, _)| !self.tasks.contains_key(id)) {
            return Err(Error::TaskNotFound(missing.to_string()));
        }

        let mut columns = Vec::new();
        let mut touched = HashSet::new();
        for (id, position) in moves {
            if let Some(task) = self.tasks.get_mut(id) {
                task.position = *position;
                columns.push(task.column_id.clone());
                touched.insert(id.clone());
            }
        }
        self.reindex(columns, &touched);
        self.bump();
        Ok(())
    }

    /// Applies a computed reorder as one unit, stamping every task it changes.
    pub fn apply_plan(&mut self, plan: &MovePlan, stamp: Stamp) -> Result<()> {
        if let Some(missing) = plan.moves.iter().find(|m| !self.tasks.contains_key(&m.task_id)) {
            return Err(Error::TaskNotFound(missing.task_id.to_string()));
        }
        if !self.columns.contains(&plan.to_column) {
            return Err(self.columns.not_found(&plan.to_column));
        }

        let mut touched = HashSet::new();
        for moved in &plan.moves {
            if let Some(task) = self.tasks.get_mut(&moved.task_id) {
                task.column_id = moved.column_id.clone();
                task.position = moved.position;
                task.version = Some(stamp);
                touched.insert(moved.task_id.clone());
            }
        }

        self.reindex([plan.from_column.clone(), plan.to_column.clone()], &touched);
        self.bump();
        debug!(
            task = %plan.task_id,
            to = %plan.to_column,
            position = plan.position,
            changed = plan.moves.len(),
            "applied move"
        );
        Ok(())
    }

    /// Sets a task's placement and version without reindexing or notifying.
    ///
    /// Callers must finish with [`TaskStore::finish_batch`].
    pub(crate) fn place(&mut self, id: &TaskId, column: ColumnId, position: u32, stamp: Stamp) {
        if let Some(task) = self.tasks.get_mut(id) {
            task.column_id = column;
            task.position = position;
            task.version = Some(stamp);
        }
    }

    /// Reindexes the given columns and publishes one revision.
    pub(crate) fn finish_batch(
        &mut self,
        columns: impl IntoIterator<Item = ColumnId>,
        touched: &HashSet<TaskId>,
    ) {
        self.reindex(columns, touched);
        self.bump();
    }

    /// Rebuilds the order of `columns` and renumbers them densely.
    ///
    /// Sort key: position, then tasks in `touched` ahead of untouched ones,
    /// then insertion order.
    fn reindex(&mut self, columns: impl IntoIterator<Item = ColumnId>, touched: &HashSet<TaskId>) {
        let columns: HashSet<ColumnId> = columns.into_iter().collect();
        for column in columns {
            let mut ids: Vec<(u32, bool, u64, TaskId)> = self
                .tasks
                .values()
                .filter(|t| t.column_id == column)
                .map(|t| (t.position, !touched.contains(&t.id), t.seq, t.id.clone()))
                .collect();
            ids.sort();

            let ordered: Vec<TaskId> = ids.into_iter().map(|(_, _, _, id)| id).collect();
            for (index, id) in ordered.iter().enumerate() {
                if let Some(task) = self.tasks.get_mut(id) {
                    task.position = index as u32;
                }
            }
            self.order.insert(column, ordered);
        }
    }

    /// Sets positions from the current order of `columns`.
    fn renumber(&mut self, columns: impl IntoIterator<Item = ColumnId>) {
        let columns: HashSet<ColumnId> = columns.into_iter().collect();
        for column in columns {
            let Some(ids) = self.order.get(&column) else {
                continue;
            };
            for (index, id) in ids.iter().enumerate() {
                if let Some(task) = self.tasks.get_mut(id) {
                    task.position = index as u32;
                }
            }
        }
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
