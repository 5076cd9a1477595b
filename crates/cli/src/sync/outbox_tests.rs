// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::outbox::Outbox;
use super::test_helpers::make_move;
use kb_core::BroadcastAdapter;

#[test]
fn take_drains_announced_moves_in_order() {
    let outbox = Outbox::new();
    let shared = outbox.clone();

    shared.announce_moves(&[make_move("T1", "in_review", 1000), make_move("T2", "todo", 1000)]);
    shared.announce_move(make_move("T3", "completed", 2000));

    let ids: Vec<String> = outbox.take().iter().map(|m| m.task_id.to_string()).collect();
    assert_eq!(ids, ["T1", "T2", "T3"]);
    assert!(outbox.take().is_empty());
}
