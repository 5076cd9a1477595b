// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::reorder::NoOpReason;
use crate::test_helpers::*;

#[test]
fn start_enters_dragging_without_touching_store() {
    let store = board(&[("a", &["T1", "T2"])]);
    let revision = store.revision();
    let mut drag = DragController::new();

    assert!(drag.start(&store, task("T1")).unwrap());

    assert!(drag.is_dragging());
    assert_eq!(drag.dragged(), Some(&task("T1")));
    let DragState::Dragging(session) = drag.state() else {
        unreachable!("expected a drag");
    };
    assert_eq!(session.origin_column, col("a"));
    assert_eq!(session.hover, None);
    assert_eq!(store.revision(), revision);
}

#[test]
fn start_on_unknown_task_stays_idle() {
    let store = board(&[("a", &["T1"])]);
    let mut drag = DragController::new();

    assert!(!drag.start(&store, task("ghost")).unwrap());
    assert_eq!(drag.state(), &DragState::Idle);
}

#[test]
fn start_twice_is_an_error() {
    let store = board(&[("a", &["T1", "T2"])]);
    let mut drag = DragController::new();
    drag.start(&store, task("T1")).unwrap();

    assert!(matches!(
        drag.start(&store, task("T2")),
        Err(Error::DragInProgress(id)) if id == "T1"
    ));
    assert_eq!(drag.dragged(), Some(&task("T1")));
}

#[test]
fn over_when_idle_is_noop() {
    let store = board(&[("a", &["T1"])]);
    let mut drag = DragController::new();

    drag.over(&store, Some(DropTarget::Column(col("a"))));

    assert_eq!(drag.state(), &DragState::Idle);
}

#[test]
fn over_tracks_only_latest_target() {
    let store = board(&[("a", &["T1", "T2"]), ("b", &["T3"])]);
    let mut drag = DragController::new();
    drag.start(&store, task("T1")).unwrap();

    for _ in 0..200 {
        drag.over(&store, Some(DropTarget::Task(task("T3"))));
        drag.over(&store, Some(DropTarget::Column(col("a"))));
        drag.over(&store, None);
    }
    drag.over(&store, Some(DropTarget::Task(task("T3"))));

    let DragState::Dragging(session) = drag.state() else {
        unreachable!("expected a drag");
    };
    assert_eq!(session.hover, Some(DropTarget::Task(task("T3"))));
    assert_eq!(session.hover_column, Some(col("b")));
}

#[test]
fn end_without_target_cancels() {
    let store = board(&[("a", &["T1"])]);
    let mut drag = DragController::new();
    drag.start(&store, task("T1")).unwrap();

    let outcome = drag.end(&store, None).unwrap();

    assert_eq!(outcome, Reorder::Cancelled(CancelReason::NoTarget));
    assert_eq!(drag.state(), &DragState::Idle);
}

#[test]
fn end_without_start_is_an_error() {
    let store = board(&[("a", &["T1"])]);
    let mut drag = DragController::new();

    assert!(matches!(
        drag.end(&store, Some(DropTarget::Column(col("a")))),
        Err(Error::NotDragging)
    ));
}

#[test]
fn end_returns_plan_and_goes_idle() {
    let store = board(&[("a", &["T1", "T2"]), ("b", &["T3"])]);
    let mut drag = DragController::new();
    drag.start(&store, task("T1")).unwrap();
    drag.over(&store, Some(DropTarget::Column(col("b"))));

    let outcome = drag.end(&store, Some(DropTarget::Column(col("b")))).unwrap();

    let Reorder::Move(plan) = outcome else {
        unreachable!("expected a move");
    };
    assert_eq!(plan.to_column, col("b"));
    assert_eq!(plan.position, 1);
    assert!(!drag.is_dragging());
}

#[test]
fn end_on_self_is_noop() {
    let store = board(&[("a", &["T1"])]);
    let mut drag = DragController::new();
    drag.start(&store, task("T1")).unwrap();

    let outcome = drag.end(&store, Some(DropTarget::Task(task("T1")))).unwrap();

    assert_eq!(outcome, Reorder::NoOp(NoOpReason::SelfDrop));
    assert!(!drag.is_dragging());
}

#[test]
fn hovered_task_deleted_before_drop_falls_back_to_its_column() {
    let mut store = board(&[("a", &["T1"]), ("b", &["T2", "T3"])]);
    let mut drag = DragController::new();
    drag.start(&store, task("T1")).unwrap();
    drag.over(&store, Some(DropTarget::Task(task("T2"))));

    store.remove(&task("T2"));
    let outcome = drag.end(&store, Some(DropTarget::Task(task("T2")))).unwrap();

    let Reorder::Move(plan) = outcome else {
        unreachable!("expected a move");
    };
    assert_eq!(plan.to_column, col("b"));
    assert_eq!(plan.position, 1);
}

#[test]
fn drop_on_unhovered_vanished_task_cancels() {
    let store = board(&[("a", &["T1"]), ("b", &["T2"])]);
    let mut drag = DragController::new();
    drag.start(&store, task("T1")).unwrap();
    drag.over(&store, Some(DropTarget::Column(col("b"))));

    let outcome = drag.end(&store, Some(DropTarget::Task(task("ghost")))).unwrap();

    assert_eq!(outcome, Reorder::Cancelled(CancelReason::TargetGone(task("ghost"))));
    assert!(!drag.is_dragging());
}

#[test]
fn dragged_task_deleted_cancels_on_next_hover() {
    let mut store = board(&[("a", &["T1", "T2"])]);
    let mut drag = DragController::new();
    drag.start(&store, task("T1")).unwrap();

    store.remove(&task("T1"));
    drag.over(&store, Some(DropTarget::Task(task("T2"))));

    assert_eq!(drag.state(), &DragState::Idle);
}

#[test]
fn dragged_task_deleted_before_drop_cancels() {
    let mut store = board(&[("a", &["T1", "T2"])]);
    let mut drag = DragController::new();
    drag.start(&store, task("T1")).unwrap();

    store.remove(&task("T1"));
    let outcome = drag.end(&store, Some(DropTarget::Column(col("a")))).unwrap();

    assert_eq!(outcome, Reorder::Cancelled(CancelReason::TaskGone));
    assert!(!drag.is_dragging());
}

#[test]
fn forget_task_only_cancels_matching_drag() {
    let store = board(&[("a", &["T1", "T2"])]);
    let mut drag = DragController::new();
    drag.start(&store, task("T1")).unwrap();

    assert!(!drag.forget_task(&task("T2")));
    assert!(drag.is_dragging());
    assert!(drag.forget_task(&task("T1")));
    assert!(!drag.is_dragging());
}

#[test]
fn every_gesture_terminates_idle() {
    let mut store = board(&[("a", &["T1", "T2", "T3"]), ("b", &["T4"])]);
    let targets = [
        None,
        Some(DropTarget::Column(col("b"))),
        Some(DropTarget::Column(col("missing"))),
        Some(DropTarget::Task(task("T1"))),
        Some(DropTarget::Task(task("T4"))),
        Some(DropTarget::Task(task("deleted"))),
    ];
    let mut drag = DragController::new();

    for target in targets {
        for dragged in ["T1", "T2", "T3", "T4"] {
            drag.start(&store, task(dragged)).unwrap();
            for hover in ["T1", "T4", "deleted"] {
                drag.over(&store, Some(DropTarget::Task(task(hover))));
            }
            let outcome = drag.end(&store, target.clone()).unwrap();
            assert_eq!(drag.state(), &DragState::Idle);
            if let Reorder::Move(plan) = outcome {
                store.apply_plan(&plan, crate::stamp::Stamp::new(1, 0, 1)).unwrap();
            }
        }
    }
}
