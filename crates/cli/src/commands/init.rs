// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use chrono::Utc;
use kb_core::Database;

use crate::config::{get_db_path, init_board_dir, write_gitignore, Config, RemoteConfig};
use crate::error::{Error, Result};
use crate::id::{derive_project, generate_node_id, validate_project};

pub fn run(project: Option<String>, remote: Option<String>) -> Result<()> {
    let target_path = std::env::current_dir()?;

    let project = match project {
        Some(p) if validate_project(&p) => p,
        Some(_) => return Err(Error::InvalidProject),
        None => derive_project(&target_path)
            .ok_or_else(|| Error::CannotDeriveProject(target_path.display().to_string()))?,
    };

    let config = build_config(&target_path, project, remote)?;
    let board_dir = init_board_dir(&target_path, &config)?;
    Database::open(&get_db_path(&board_dir, &config))?;
    write_gitignore(&board_dir)?;

    println!("Initialized board at {}", board_dir.display());
    println!("Project: {}", config.project);
    let columns: Vec<&str> = config.columns.iter().map(|c| c.id.as_str()).collect();
    println!("Columns: {}", columns.join(", "));
    if let Some(remote) = &config.remote {
        println!("Remote: {}", remote.url);
    }
    Ok(())
}

/// Config for a new board, with a node id unique to this checkout.
pub(crate) fn build_config(path: &Path, project: String, remote: Option<String>) -> Result<Config> {
    let node = generate_node_id(path, &Utc::now());
    let mut config = Config::new(project, node)?;
    config.remote = remote.map(RemoteConfig::new).transpose()?;
    Ok(config)
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
