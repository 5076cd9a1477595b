// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod board;
pub mod edit;
pub mod init;
pub mod new;
pub mod r#move;
pub mod rm;
pub mod show;
pub mod sync;

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::warn;

use kb_core::{Board, ClockSource, ColumnSet, Database, Notice, ProjectId, TaskStore};

use crate::config::{find_board_dir, get_db_path, get_queue_path, Config};
use crate::error::{Error, Result};
use crate::sync::SyncConfig;

/// How long a command waits for its moves to be saved before giving up.
pub(crate) const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// The board found by walking up from the current directory.
pub(crate) struct Workspace {
    pub board_dir: PathBuf,
    pub config: Config,
    pub columns: ColumnSet,
}

impl Workspace {
    pub fn open() -> Result<Self> {
        let board_dir = find_board_dir()?;
        let config = Config::load(&board_dir)?;
        let columns = config.column_set()?;
        Ok(Workspace {
            board_dir,
            config,
            columns,
        })
    }

    pub fn project(&self) -> ProjectId {
        ProjectId::new(self.config.project.as_str())
    }

    pub fn open_db(&self) -> Result<Database> {
        Ok(Database::open(&get_db_path(&self.board_dir, &self.config))?)
    }

    /// Loads the project's tasks into a fresh store.
    pub fn load_store(&self, db: &Database) -> Result<TaskStore> {
        let project = self.project();
        let tasks = db.load_project(&project)?;
        Ok(TaskStore::load(project, self.columns.clone(), tasks)?)
    }

    pub fn queue_path(&self) -> PathBuf {
        get_queue_path(&self.board_dir)
    }

    pub fn sync_config(&self) -> Option<SyncConfig> {
        self.config
            .remote
            .as_ref()
            .map(|remote| SyncConfig::from_remote(remote, self.project()))
    }
}

/// Single-threaded runtime for commands that drive a [`Board`].
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Parses `YYYY-MM-DD`.
pub(crate) fn parse_due(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate(s.to_string()))
}

/// `None` for the literal "none", otherwise the value.
pub(crate) fn clearable(value: String) -> Option<String> {
    if value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value)
    }
}

/// Waits for the board's saves, then prints whatever went wrong.
pub(crate) async fn settle<C: ClockSource>(board: &mut Board<C>) {
    if tokio::time::timeout(SETTLE_TIMEOUT, board.settle()).await.is_err() {
        let unsaved: Vec<String> = board.unsaved().iter().map(|id| id.to_string()).collect();
        warn!(tasks = ?unsaved, "saves still pending at exit");
        if unsaved.is_empty() {
            eprintln!("warning: could not confirm the save of the new task order");
        } else {
            eprintln!(
                "warning: could not confirm the save of {}",
                unsaved.join(", ")
            );
        }
    }
    report_notices(board.notices());
}

pub(crate) fn report_notices(notices: Vec<Notice>) {
    for notice in notices {
        match notice {
            Notice::MaybeNotSaved { task_id, reason } => {
                eprintln!("warning: move of {} may not have been saved: {}", task_id, reason)
            }
            Notice::RemoteRejected { message } => {
                eprintln!("warning: relay rejected a move: {}", message)
            }
            Notice::OrderNotSaved { reason } => {
                eprintln!("warning: new task order may not have been saved: {}", reason)
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
