// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::task::Priority;
use chrono::NaiveDate;
use tempfile::TempDir;

fn stored(id: &str, column: &str, position: u32, seq: u64) -> Task {
    let mut task = Task::new(id, "proj", column, TaskPayload::new(format!("Task {id}")));
    task.position = position;
    task.seq = seq;
    task
}

fn commit(id: &str, column: &str, position: u32, wall_ms: u64) -> MoveCommit {
    MoveCommit {
        task_id: id.into(),
        project_id: "proj".into(),
        column_id: column.into(),
        position,
        version: Stamp::new(wall_ms, 0, 1),
    }
}

fn relayed(id: &str, project: &str, to: &str, wall_ms: u64) -> RemoteMove {
    RemoteMove {
        version: Stamp::new(wall_ms, 0, 3),
        task_id: id.into(),
        project_id: project.into(),
        source_column: "todo".into(),
        destination_column: to.into(),
        position: 0,
    }
}

#[test]
fn insert_and_get_task() {
    let db = Database::open_in_memory().unwrap();
    let mut task = stored("T1", "todo", 0, 0);
    task.payload = TaskPayload::new("Write docs")
        .with_assignee("kit")
        .with_priority(Priority::High)
        .with_due(NaiveDate::from_ymd_opt(2026, 11, 2).unwrap());
    task.payload.description = Some("For the API".into());

    db.insert_task(&task).unwrap();
    let loaded = db.get_task(&"T1".into()).unwrap();

    assert_eq!(loaded, task);
}

#[test]
fn get_missing_task_is_not_found() {
    let db = Database::open_in_memory().unwrap();
    assert!(matches!(
        db.get_task(&"nope".into()),
        Err(Error::TaskNotFound(id)) if id == "nope"
    ));
}

#[test]
fn duplicate_insert_fails() {
    let db = Database::open_in_memory().unwrap();
    db.insert_task(&stored("T1", "todo", 0, 0)).unwrap();
    assert!(matches!(
        db.insert_task(&stored("T1", "todo", 1, 1)),
        Err(Error::Database(_))
    ));
}

#[test]
fn load_project_filters_and_orders() {
    let db = Database::open_in_memory().unwrap();
    db.insert_task(&stored("T2", "todo", 1, 1)).unwrap();
    db.insert_task(&stored("T1", "todo", 0, 0)).unwrap();
    db.insert_task(&stored("T3", "done", 0, 2)).unwrap();
    let mut other = stored("X1", "todo", 0, 0);
    other.project_id = "other".into();
    db.insert_task(&other).unwrap();

    let tasks = db.load_project(&"proj".into()).unwrap();
    let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();

    assert_eq!(ids, ["T3", "T1", "T2"]);
}

#[test]
fn resolve_id_accepts_unique_prefix() {
    let db = Database::open_in_memory().unwrap();
    db.insert_task(&stored("kb-a1b2", "todo", 0, 0)).unwrap();
    db.insert_task(&stored("kb-a1c3", "todo", 1, 1)).unwrap();
    db.insert_task(&stored("kb-ffff", "todo", 2, 2)).unwrap();
    let project = ProjectId::from("proj");

    assert_eq!(db.resolve_id(&project, "kb-a1b2").unwrap().as_str(), "kb-a1b2");
    assert_eq!(db.resolve_id(&project, "kb-f").unwrap().as_str(), "kb-ffff");
    assert!(matches!(
        db.resolve_id(&project, "kb-a1"),
        Err(Error::AmbiguousId { matches, .. }) if matches == ["kb-a1b2", "kb-a1c3"]
    ));
    assert!(matches!(
        db.resolve_id(&project, "kb-9"),
        Err(Error::TaskNotFound(_))
    ));
    assert!(matches!(
        db.resolve_id(&"other".into(), "kb-ffff"),
        Err(Error::TaskNotFound(_))
    ));
}

#[test]
fn update_payload_keeps_placement() {
    let db = Database::open_in_memory().unwrap();
    db.insert_task(&stored("T1", "todo", 3, 0)).unwrap();

    let payload = TaskPayload::new("Renamed").with_priority(Priority::Urgent);
    db.update_payload(&"T1".into(), &payload).unwrap();

    let loaded = db.get_task(&"T1".into()).unwrap();
    assert_eq!(loaded.payload.title, "Renamed");
    assert_eq!(loaded.payload.priority, Priority::Urgent);
    assert_eq!(loaded.position, 3);
    assert!(matches!(
        db.update_payload(&"ghost".into(), &payload),
        Err(Error::TaskNotFound(_))
    ));
}

#[test]
fn delete_task_reports_whether_it_existed() {
    let db = Database::open_in_memory().unwrap();
    db.insert_task(&stored("T1", "todo", 0, 0)).unwrap();

    assert!(db.delete_task(&"T1".into()).unwrap());
    assert!(!db.delete_task(&"T1".into()).unwrap());
    assert!(!db.task_exists(&"T1".into()).unwrap());
}

#[test]
fn commit_move_writes_newer_versions_only() {
    let mut db = Database::open_in_memory().unwrap();
    db.insert_task(&stored("T1", "todo", 0, 0)).unwrap();

    assert!(db.commit_move(&commit("T1", "done", 2, 2000)).unwrap());
    assert!(!db.commit_move(&commit("T1", "todo", 0, 1000)).unwrap());
    assert!(!db.commit_move(&commit("T1", "todo", 0, 2000)).unwrap());

    let loaded = db.get_task(&"T1".into()).unwrap();
    assert_eq!(loaded.column_id.as_str(), "done");
    assert_eq!(loaded.position, 2);
    assert_eq!(loaded.version, Some(Stamp::new(2000, 0, 1)));
}

#[test]
fn renumber_applies_only_to_unmoved_tasks() {
    let mut db = Database::open_in_memory().unwrap();
    db.insert_task(&stored("T1", "todo", 3, 0)).unwrap();
    db.insert_task(&stored("T2", "todo", 4, 1)).unwrap();
    db.insert_task(&stored("T3", "todo", 5, 2)).unwrap();
    db.commit_move(&commit("T2", "todo", 4, 1000)).unwrap();

    let renumbers = [
        Renumber {
            task_id: "T1".into(),
            column_id: "todo".into(),
            position: 0,
            version: None,
        },
        // Saved against an older version than the stored one.
        Renumber {
            task_id: "T2".into(),
            column_id: "todo".into(),
            position: 1,
            version: None,
        },
        // Renumbered in a column it has since left.
        Renumber {
            task_id: "T3".into(),
            column_id: "done".into(),
            position: 2,
            version: None,
        },
    ];
    assert_eq!(db.renumber(&renumbers).unwrap(), 1);

    assert_eq!(db.get_task(&"T1".into()).unwrap().position, 0);
    assert_eq!(db.get_task(&"T2".into()).unwrap().position, 4);
    assert_eq!(db.get_task(&"T3".into()).unwrap().position, 5);

    let current = Renumber {
        task_id: "T2".into(),
        column_id: "todo".into(),
        position: 1,
        version: Some(Stamp::new(1000, 0, 1)),
    };
    assert_eq!(db.renumber(&[current]).unwrap(), 1);
    assert_eq!(db.get_task(&"T2".into()).unwrap().position, 1);
}

#[test]
fn commit_move_for_deleted_task_fails() {
    let mut db = Database::open_in_memory().unwrap();
    assert!(matches!(
        db.commit_move(&commit("gone", "done", 0, 1000)),
        Err(Error::TaskNotFound(_))
    ));
}

#[test]
fn placements_keep_latest_per_task() {
    let mut db = Database::open_in_memory().unwrap();

    assert!(db.record_placement(&relayed("T1", "proj", "in_review", 3000)).unwrap());
    assert!(!db.record_placement(&relayed("T1", "proj", "todo", 1000)).unwrap());
    assert!(db.record_placement(&relayed("T2", "proj", "completed", 2000)).unwrap());
    assert!(db.record_placement(&relayed("Z1", "other", "todo", 500)).unwrap());

    let moves = db.placements(&"proj".into()).unwrap();
    let summary: Vec<(&str, &str)> = moves
        .iter()
        .map(|m| (m.task_id.as_str(), m.destination_column.as_str()))
        .collect();

    assert_eq!(summary, [("T2", "completed"), ("T1", "in_review")]);
}

#[test]
fn open_creates_parent_dirs_and_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("board.db");

    {
        let db = Database::open(&path).unwrap();
        db.insert_task(&stored("T1", "todo", 0, 0)).unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert!(db.task_exists(&"T1".into()).unwrap());
}

#[test]
fn corrupted_priority_is_reported() {
    let db = Database::open_in_memory().unwrap();
    db.insert_task(&stored("T1", "todo", 0, 0)).unwrap();
    db.conn
        .execute("UPDATE tasks SET priority = 'whenever' WHERE id = 'T1'", [])
        .unwrap();

    assert!(db.get_task(&"T1".into()).is_err());
}
