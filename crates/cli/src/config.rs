// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Board configuration management.
//!
//! Configuration is stored in `.kanban/config.toml` and includes:
//! - `project`: the project this board shows, also the prefix of task ids
//! - `node`: this client's id in version stamps
//! - `columns`: the board's fixed columns, in display order
//! - `remote`: optional relay server for sharing moves

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use kb_core::{Column, ColumnSet};

use crate::error::{Error, Result};
use crate::id::validate_project;

const BOARD_DIR_NAME: &str = ".kanban";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "board.db";
const QUEUE_FILE_NAME: &str = "queue.jsonl";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Board configuration stored in `.kanban/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub project: String,
    /// Node id stamped into every local move.
    pub node: u32,
    /// Optional database path (relative to the board's parent directory or absolute).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db: Option<String>,
    #[serde(default = "default_columns")]
    pub columns: Vec<Column>,
    /// Relay configuration (optional; local-only when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,
}

/// Relay server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// `ws://...` or `wss://...`
    pub url: String,
    /// Maximum connection attempts per command (default: 3).
    #[serde(default = "default_reconnect_max_retries")]
    pub reconnect_max_retries: u32,
    /// Maximum delay between attempts in seconds (default: 5).
    #[serde(default = "default_reconnect_max_delay_secs")]
    pub reconnect_max_delay_secs: u64,
}

fn default_columns() -> Vec<Column> {
    ColumnSet::standard().iter().cloned().collect()
}

fn default_reconnect_max_retries() -> u32 {
    3
}

fn default_reconnect_max_delay_secs() -> u64 {
    5
}

impl RemoteConfig {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(Error::InvalidRemoteUrl(url));
        }
        Ok(RemoteConfig {
            url,
            reconnect_max_retries: default_reconnect_max_retries(),
            reconnect_max_delay_secs: default_reconnect_max_delay_secs(),
        })
    }
}

impl Config {
    /// Creates a config for `project` with the standard columns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProject`] if the name cannot prefix task ids.
    pub fn new(project: String, node: u32) -> Result<Self> {
        if !validate_project(&project) {
            return Err(Error::InvalidProject);
        }
        Ok(Config {
            project,
            node,
            db: None,
            columns: default_columns(),
            remote: None,
        })
    }

    /// Loads configuration from the given `.kanban/` directory.
    pub fn load(board_dir: &Path) -> Result<Self> {
        let config_path = board_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Saves configuration to the given `.kanban/` directory.
    pub fn save(&self, board_dir: &Path) -> Result<()> {
        let config_path = board_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    /// The configured columns, checked for emptiness and duplicates.
    pub fn column_set(&self) -> Result<ColumnSet> {
        Ok(ColumnSet::new(self.columns.clone())?)
    }
}

/// Find the .kanban directory by walking up from the current directory
pub fn find_board_dir() -> Result<PathBuf> {
    let mut current = std::env::current_dir()?;
    loop {
        let board_dir = current.join(BOARD_DIR_NAME);
        if board_dir.is_dir() {
            return Ok(board_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Get the database path from config
pub fn get_db_path(board_dir: &Path, config: &Config) -> PathBuf {
    match &config.db {
        Some(db) => {
            let db_path = Path::new(db);
            if db_path.is_absolute() {
                db_path.to_path_buf()
            } else {
                board_dir.parent().unwrap_or(board_dir).join(db_path)
            }
        }
        None => board_dir.join(DB_FILE_NAME),
    }
}

/// Path of the offline move queue.
pub fn get_queue_path(board_dir: &Path) -> PathBuf {
    board_dir.join(QUEUE_FILE_NAME)
}

/// Initialize a new .kanban directory holding `config`.
pub fn init_board_dir(path: &Path, config: &Config) -> Result<PathBuf> {
    let board_dir = path.join(BOARD_DIR_NAME);

    if board_dir.exists() {
        return Err(Error::AlreadyInitialized(board_dir.display().to_string()));
    }

    fs::create_dir_all(&board_dir)?;
    config.save(&board_dir)?;

    Ok(board_dir)
}

/// Write .gitignore so only the config is tracked.
pub fn write_gitignore(board_dir: &Path) -> Result<()> {
    let gitignore_path = board_dir.join(GITIGNORE_FILE_NAME);
    let content = "# Local board state\nboard.db\nboard.db-*\n\n# Moves waiting for the relay\nqueue.jsonl\n";
    fs::write(&gitignore_path, content)?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
