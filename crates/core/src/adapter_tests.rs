// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::stamp::Stamp;
use crate::task::{Task, TaskPayload};
use std::sync::Mutex as StdMutex;

fn commit(id: &str, wall_ms: u64) -> MoveCommit {
    MoveCommit {
        task_id: id.into(),
        project_id: "proj".into(),
        column_id: "completed".into(),
        position: 0,
        version: Stamp::new(wall_ms, 0, 1),
    }
}

fn persistence_with(ids: &[&str]) -> SqlitePersistence {
    let db = Database::open_in_memory().unwrap();
    for id in ids {
        db.insert_task(&Task::new(*id, "proj", "todo", TaskPayload::new("t")))
            .unwrap();
    }
    SqlitePersistence::new(db)
}

#[tokio::test]
async fn sqlite_commit_writes_placement() {
    let persistence = persistence_with(&["T1"]);

    persistence.commit_move(commit("T1", 1000)).await.unwrap();

    let db = persistence.database();
    let task = db.lock().await.get_task(&"T1".into()).unwrap();
    assert_eq!(task.column_id.as_str(), "completed");
    assert_eq!(task.version, Some(Stamp::new(1000, 0, 1)));
}

#[tokio::test]
async fn sqlite_superseded_commit_is_success() {
    let persistence = persistence_with(&["T1"]);

    persistence.commit_move(commit("T1", 2000)).await.unwrap();
    persistence.commit_move(commit("T1", 1000)).await.unwrap();

    let db = persistence.database();
    let task = db.lock().await.get_task(&"T1".into()).unwrap();
    assert_eq!(task.version, Some(Stamp::new(2000, 0, 1)));
}

#[tokio::test]
async fn sqlite_commit_of_missing_task_fails() {
    let persistence = persistence_with(&[]);

    let err = persistence.commit_move(commit("ghost", 1000)).await.unwrap_err();

    assert_eq!(err, PersistError::NotFound("ghost".into()));
}

#[tokio::test]
async fn sqlite_positions_skip_tasks_moved_since() {
    let persistence = persistence_with(&["T1", "T2"]);
    persistence.commit_move(commit("T2", 1000)).await.unwrap();

    let renumbers = ["T1", "T2"]
        .into_iter()
        .map(|id| Renumber {
            task_id: id.into(),
            column_id: "todo".into(),
            position: 7,
            version: None,
        })
        .collect();
    persistence.commit_positions(renumbers).await.unwrap();

    let db = persistence.database();
    let db = db.lock().await;
    assert_eq!(db.get_task(&"T1".into()).unwrap().position, 7);
    let moved = db.get_task(&"T2".into()).unwrap();
    assert_eq!(moved.column_id.as_str(), "completed");
    assert_eq!(moved.position, 0);
}

#[derive(Default)]
struct Recorder {
    seen: StdMutex<Vec<String>>,
}

impl BroadcastAdapter for Recorder {
    fn announce_move(&self, mv: RemoteMove) {
        self.seen.lock().unwrap().push(mv.task_id.to_string());
    }
}

#[test]
fn announce_moves_defaults_to_one_call_per_move() {
    let recorder = Recorder::default();
    let mv = |id: &str| RemoteMove {
        version: Stamp::new(1, 0, 1),
        task_id: id.into(),
        project_id: "proj".into(),
        source_column: "todo".into(),
        destination_column: "completed".into(),
        position: 0,
    };

    recorder.announce_moves(&[mv("T1"), mv("T2")]);

    assert_eq!(*recorder.seen.lock().unwrap(), ["T1", "T2"]);
}
