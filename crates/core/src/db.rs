// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite storage for boards.
//!
//! Two tables:
//! - `tasks`: a client's durable copy of its board, written by the CRUD
//!   commands and by [`Database::commit_move`].
//! - `placements`: the relay server's record of the latest move per task,
//!   written by [`Database::record_placement`] and served as snapshots.
//!
//! Both writers compare the incoming [`Stamp`] with the stored one and skip
//! anything that is not newer, so a late write can never regress a task.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

use crate::error::{Error, Result};
use crate::op::{MoveCommit, RemoteMove, Renumber};
use crate::stamp::Stamp;
use crate::task::{ProjectId, Task, TaskId, TaskPayload};

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL,
    column_id TEXT NOT NULL,
    position INTEGER NOT NULL,
    seq INTEGER NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    assignee TEXT,
    priority TEXT NOT NULL DEFAULT 'medium',
    due TEXT,
    created_at TEXT NOT NULL,
    version TEXT
);

CREATE TABLE IF NOT EXISTS placements (
    task_id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL,
    source_column TEXT NOT NULL,
    column_id TEXT NOT NULL,
    position INTEGER NOT NULL,
    version TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tasks_project ON tasks(project_id, column_id, position);
CREATE INDEX IF NOT EXISTS idx_placements_project ON placements(project_id);
"#;

/// Wraps a parse failure in a rusqlite conversion error.
fn corrupted(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

fn parse_db<T: std::str::FromStr>(value: &str, column: &str) -> rusqlite::Result<T> {
    value
        .parse()
        .map_err(|_| corrupted(format!("invalid value '{value}' in column '{column}'")))
}

fn parse_stamp_opt(value: Option<String>) -> rusqlite::Result<Option<Stamp>> {
    value.map(|s| parse_db(&s, "version")).transpose()
}

fn parse_timestamp(value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| corrupted(format!("invalid timestamp '{value}'")))
}

fn parse_date_opt(value: Option<String>) -> rusqlite::Result<Option<NaiveDate>> {
    value.map(|s| parse_db(&s, "due")).transpose()
}

const TASK_COLUMNS: &str = "id, project_id, column_id, position, seq, title, description, \
     assignee, priority, due, created_at, version";

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let priority: String = row.get(8)?;
    let created_at: String = row.get(10)?;
    Ok(Task {
        id: TaskId::new(row.get::<_, String>(0)?),
        project_id: ProjectId::new(row.get::<_, String>(1)?),
        column_id: row.get::<_, String>(2)?.into(),
        position: row.get(3)?,
        seq: row.get::<_, i64>(4)? as u64,
        version: parse_stamp_opt(row.get(11)?)?,
        payload: TaskPayload {
            title: row.get(5)?,
            description: row.get(6)?,
            assignee: row.get(7)?,
            priority: parse_db(&priority, "priority")?,
            due: parse_date_opt(row.get(9)?)?,
            created_at: parse_timestamp(&created_at)?,
        },
    })
}

/// SQLite connection holding one or more boards.
pub struct Database {
    pub conn: Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        conn.execute_batch(SCHEMA)?;
        Ok(Database { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Database { conn })
    }

    pub fn insert_task(&self, task: &Task) -> Result<()> {
        self.conn.execute(
            &format!(
                "INSERT INTO tasks ({TASK_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
            ),
            params![
                task.id.as_str(),
                task.project_id.as_str(),
                task.column_id.as_str(),
                task.position,
                task.seq as i64,
                task.payload.title,
                task.payload.description,
                task.payload.assignee,
                task.payload.priority.as_str(),
                task.payload.due.map(|d| d.to_string()),
                task.payload.created_at.to_rfc3339(),
                task.version.map(|v| v.to_string()),
            ],
        )?;
        Ok(())
    }

    pub fn get_task(&self, id: &TaskId) -> Result<Task> {
        self.conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id.as_str()],
                task_from_row,
            )
            .optional()?
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }

    pub fn task_exists(&self, id: &TaskId) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM tasks WHERE id = ?1",
            params![id.as_str()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Resolves a full or unique leading part of a task id within a project.
    pub fn resolve_id(&self, project: &ProjectId, partial: &str) -> Result<TaskId> {
        let mut stmt = self.conn.prepare(
            "SELECT id FROM tasks WHERE project_id = ?1 AND substr(id, 1, length(?2)) = ?2
             ORDER BY id",
        )?;
        let matches = stmt
            .query_map(params![project.as_str(), partial], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        if matches.iter().any(|id| id == partial) {
            return Ok(TaskId::new(partial));
        }
        match matches.as_slice() {
            [] => Err(Error::TaskNotFound(partial.to_string())),
            [only] => Ok(TaskId::new(only.as_str())),
            _ => Err(Error::AmbiguousId {
                prefix: partial.to_string(),
                matches,
            }),
        }
    }

    /// All tasks of a project, in `(column, position, seq)` order.
    pub fn load_project(&self, project: &ProjectId) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = ?1
             ORDER BY column_id, position, seq"
        ))?;
        let tasks = stmt
            .query_map(params![project.as_str()], task_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    pub fn update_payload(&self, id: &TaskId, payload: &TaskPayload) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE tasks SET title = ?1, description = ?2, assignee = ?3, priority = ?4, due = ?5
             WHERE id = ?6",
            params![
                payload.title,
                payload.description,
                payload.assignee,
                payload.priority.as_str(),
                payload.due.map(|d| d.to_string()),
                id.as_str(),
            ],
        )?;
        if affected == 0 {
            return Err(Error::TaskNotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn delete_task(&self, id: &TaskId) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id.as_str()])?;
        Ok(affected > 0)
    }

    /// Writes a task's new placement unless a newer move is already stored.
    ///
    /// Returns `Ok(true)` if written, `Ok(false)` if the commit was stale.
    pub fn commit_move(&mut self, commit: &MoveCommit) -> Result<bool> {
        let tx = self.conn.transaction()?;

        let stored: Option<Option<String>> = tx
            .query_row(
                "SELECT version FROM tasks WHERE id = ?1",
                params![commit.task_id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        let Some(stored) = stored else {
            return Err(Error::TaskNotFound(commit.task_id.to_string()));
        };
        let stored = stored.map(|s| s.parse::<Stamp>()).transpose()?;
        if !commit.version.supersedes(stored.as_ref()) {
            return Ok(false);
        }

        tx.execute(
            "UPDATE tasks SET column_id = ?1, position = ?2, version = ?3 WHERE id = ?4",
            params![
                commit.column_id.as_str(),
                commit.position,
                commit.version.to_string(),
                commit.task_id.as_str(),
            ],
        )?;
        tx.commit()?;
        Ok(true)
    }

    /// Writes renumbered positions of tasks that have not moved since.
    ///
    /// Returns how many rows were updated.
    pub fn renumber(&mut self, renumbers: &[Renumber]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut updated = 0;
        for r in renumbers {
            updated += tx.execute(
                "UPDATE tasks SET position = ?1
                 WHERE id = ?2 AND column_id = ?3 AND version IS ?4",
                params![
                    r.position,
                    r.task_id.as_str(),
                    r.column_id.as_str(),
                    r.version.map(|v| v.to_string()),
                ],
            )?;
        }
        tx.commit()?;
        Ok(updated)
    }

    /// Records a relayed move unless a newer one is already recorded.
    ///
    /// Returns `Ok(true)` if recorded, `Ok(false)` if stale.
    pub fn record_placement(&mut self, mv: &RemoteMove) -> Result<bool> {
        let tx = self.conn.transaction()?;

        let stored: Option<String> = tx
            .query_row(
                "SELECT version FROM placements WHERE task_id = ?1",
                params![mv.task_id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        let stored = stored.map(|s| s.parse::<Stamp>()).transpose()?;
        if !mv.version.supersedes(stored.as_ref()) {
            return Ok(false);
        }

        tx.execute(
            "INSERT INTO placements (task_id, project_id, source_column, column_id, position, version)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(task_id) DO UPDATE SET
                project_id = excluded.project_id,
                source_column = excluded.source_column,
                column_id = excluded.column_id,
                position = excluded.position,
                version = excluded.version",
            params![
                mv.task_id.as_str(),
                mv.project_id.as_str(),
                mv.source_column.as_str(),
                mv.destination_column.as_str(),
                mv.position,
                mv.version.to_string(),
            ],
        )?;
        tx.commit()?;
        Ok(true)
    }

    /// Latest recorded move of every task in a project, oldest first.
    pub fn placements(&self, project: &ProjectId) -> Result<Vec<RemoteMove>> {
        let mut stmt = self.conn.prepare(
            "SELECT task_id, project_id, source_column, column_id, position, version
             FROM placements WHERE project_id = ?1",
        )?;
        let mut moves = stmt
            .query_map(params![project.as_str()], |row| {
                let version: String = row.get(5)?;
                Ok(RemoteMove {
                    task_id: TaskId::new(row.get::<_, String>(0)?),
                    project_id: ProjectId::new(row.get::<_, String>(1)?),
                    source_column: row.get::<_, String>(2)?.into(),
                    destination_column: row.get::<_, String>(3)?.into(),
                    position: row.get(4)?,
                    version: parse_db(&version, "version")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        moves.sort();
        Ok(moves)
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
