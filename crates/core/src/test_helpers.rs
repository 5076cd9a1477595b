// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for building boards.

#![allow(clippy::unwrap_used)]

use crate::column::{Column, ColumnSet};
use crate::store::TaskStore;
use crate::task::{ColumnId, Task, TaskId, TaskPayload};

pub const PROJECT: &str = "proj";

/// Three short columns `a`, `b`, `c`.
pub fn columns() -> ColumnSet {
    ColumnSet::new(vec![
        Column::new("a", "Column A"),
        Column::new("b", "Column B"),
        Column::new("c", "Column C"),
    ])
    .unwrap()
}

/// Builds a store where each `(column, ids)` pair lists tasks in order.
pub fn board(layout: &[(&str, &[&str])]) -> TaskStore {
    let mut store = TaskStore::new(PROJECT, columns());
    for (column, ids) in layout {
        for id in *ids {
            store
                .insert(Task::new(*id, PROJECT, *column, TaskPayload::new(format!("Task {id}"))))
                .unwrap();
        }
    }
    store
}

/// Task ids of a column in display order.
pub fn ids(store: &TaskStore, column: &str) -> Vec<String> {
    store
        .list_by_column(&ColumnId::from(column))
        .iter()
        .map(|t| t.id.to_string())
        .collect()
}

/// Positions of a column in display order.
pub fn positions(store: &TaskStore, column: &str) -> Vec<u32> {
    store
        .list_by_column(&ColumnId::from(column))
        .iter()
        .map(|t| t.position)
        .collect()
}

/// Asserts every column is numbered `0..n`.
pub fn assert_dense(store: &TaskStore) {
    for column in store.columns().ids() {
        let positions: Vec<u32> = store.list_by_column(column).iter().map(|t| t.position).collect();
        let expected: Vec<u32> = (0..positions.len() as u32).collect();
        assert_eq!(positions, expected, "column {column} is not dense");
    }
}

pub fn task(id: &str) -> TaskId {
    TaskId::from(id)
}

pub fn col(id: &str) -> ColumnId {
    ColumnId::from(id)
}
