// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn kb() -> Command {
    cargo_bin_cmd!("kb")
}

/// Helper to create an initialized board in a temp directory
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    kb().arg("init")
        .arg("--project")
        .arg("web")
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Helper to create an initialized board that shares moves through `url`
pub fn init_temp_remote(url: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    kb().arg("init")
        .arg("--project")
        .arg("web")
        .arg("--remote")
        .arg(url)
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Helper to create a task and return its ID
pub fn create_task(temp: &TempDir, title: &str, column: Option<&str>) -> String {
    let mut cmd = kb();
    cmd.arg("new").arg(title).arg("-o").arg("id");
    if let Some(column) = column {
        cmd.arg("--column").arg(column);
    }
    let output = cmd.current_dir(temp.path()).output().unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Ids of the tasks in `column`, top to bottom
pub fn column_ids(temp: &TempDir, column: &str) -> Vec<String> {
    let output = kb()
        .arg("board")
        .arg("-o")
        .arg("json")
        .current_dir(temp.path())
        .output()
        .unwrap();
    let board: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == column)
        .unwrap()["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect()
}
