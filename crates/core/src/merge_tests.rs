// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::stamp::Stamp;
use crate::test_helpers::*;

fn remote(id: &str, from: &str, to: &str, position: u32, wall_ms: u64) -> RemoteMove {
    RemoteMove {
        version: Stamp::new(wall_ms, 0, 2),
        task_id: task(id),
        project_id: PROJECT.into(),
        source_column: col(from),
        destination_column: col(to),
        position,
    }
}

#[test]
fn applies_newer_move() {
    let mut store = board(&[("a", &["T1", "T2"]), ("b", &["T3"])]);

    let applied = store.apply_remote(&[remote("T1", "a", "b", 0, 1000)]);

    assert_eq!(applied, 1);
    assert_eq!(ids(&store, "a"), ["T2"]);
    assert_eq!(ids(&store, "b"), ["T1", "T3"]);
    assert_eq!(store.get(&task("T1")).unwrap().version, Some(Stamp::new(1000, 0, 2)));
    assert_dense(&store);
}

#[test]
fn rejects_stale_and_equal_versions() {
    let mut store = board(&[("a", &["T1"]), ("b", &[])]);
    store.apply_remote(&[remote("T1", "a", "b", 0, 2000)]);

    assert_eq!(store.apply_remote(&[remote("T1", "b", "c", 0, 1000)]), 0);
    assert_eq!(store.apply_remote(&[remote("T1", "b", "c", 0, 2000)]), 0);
    assert_eq!(ids(&store, "b"), ["T1"]);
}

#[test]
fn out_of_order_delivery_converges_on_newest() {
    let mut store = board(&[("a", &["T1"])]);

    store.apply_remote(&[remote("T1", "a", "c", 0, 3000)]);
    store.apply_remote(&[remote("T1", "a", "b", 0, 2000)]);

    assert_eq!(ids(&store, "c"), ["T1"]);
    assert!(ids(&store, "b").is_empty());
}

#[test]
fn batch_within_itself_is_ordered_by_version() {
    let mut store = board(&[("a", &["T1"])]);

    let applied = store.apply_remote(&[
        remote("T1", "b", "c", 0, 3000),
        remote("T1", "a", "b", 0, 2000),
    ]);

    assert_eq!(applied, 2);
    assert_eq!(ids(&store, "c"), ["T1"]);
}

#[test]
fn skips_unknown_task_project_and_column() {
    let mut store = board(&[("a", &["T1"])]);
    let mut other_project = remote("T1", "a", "b", 0, 1000);
    other_project.project_id = "elsewhere".into();

    let applied = store.apply_remote(&[
        remote("ghost", "a", "b", 0, 1000),
        other_project,
        remote("T1", "a", "archive", 0, 1000),
    ]);

    assert_eq!(applied, 0);
    assert_eq!(ids(&store, "a"), ["T1"]);
}

#[test]
fn batch_publishes_one_revision() {
    let mut store = board(&[("a", &["T1", "T2", "T3"]), ("b", &["T4"])]);
    let before = store.revision();

    // Another client dragged T1 onto T4: T1 takes 0, T4 shifts to 1, column a closes up.
    store.apply_remote(&[
        remote("T1", "a", "b", 0, 1000),
        remote("T4", "b", "b", 1, 1000),
        remote("T2", "a", "a", 0, 1000),
        remote("T3", "a", "a", 1, 1000),
    ]);

    assert_eq!(store.revision(), before + 1);
    assert_eq!(ids(&store, "a"), ["T2", "T3"]);
    assert_eq!(ids(&store, "b"), ["T1", "T4"]);
}

#[test]
fn remote_insert_wins_position_tie() {
    let mut store = board(&[("a", &["T1"]), ("b", &["T2", "T3"])]);

    store.apply_remote(&[remote("T1", "a", "b", 1, 1000)]);

    assert_eq!(ids(&store, "b"), ["T2", "T1", "T3"]);
    assert_dense(&store);
}

#[test]
fn replaying_a_batch_is_a_noop() {
    let mut store = board(&[("a", &["T1", "T2"])]);
    let batch = [remote("T2", "a", "a", 0, 1000), remote("T1", "a", "a", 1, 1000)];

    assert_eq!(store.apply_remote(&batch), 2);
    let revision = store.revision();
    assert_eq!(store.apply_remote(&batch), 0);
    assert_eq!(store.revision(), revision);
    assert_eq!(ids(&store, "a"), ["T2", "T1"]);
}
