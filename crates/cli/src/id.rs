// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Generate a task ID from project, title, and timestamp.
/// Format: {project}-{hash} where hash is first 8 hex chars of SHA256(title + timestamp)
pub fn generate_id(project: &str, title: &str, created_at: &DateTime<Utc>) -> String {
    let input = format!("{}{}", title, created_at.to_rfc3339());
    let hash = Sha256::digest(input.as_bytes());
    let short_hash = hex::encode(&hash[..4]);
    format!("{}-{}", project, short_hash)
}

/// Generate a unique ID, handling collisions by appending incrementing suffix.
pub fn generate_unique_id<F>(
    project: &str,
    title: &str,
    created_at: &DateTime<Utc>,
    exists: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    let base_id = generate_id(project, title, created_at);

    if !exists(&base_id) {
        return base_id;
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id) {
            return id;
        }
        suffix += 1;
    }
}

/// Validate that a project name can prefix ids (2+ lowercase alphanumeric with at least one letter)
pub fn validate_project(project: &str) -> bool {
    project.len() >= 2
        && project
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && project.chars().any(|c| c.is_ascii_lowercase())
}

/// Lowercased alphanumerics of the directory name, if that makes a valid project.
pub fn derive_project(path: &Path) -> Option<String> {
    let dir_name = path.file_name()?.to_str()?;
    let project: String = dir_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    validate_project(&project).then_some(project)
}

/// Node id for version stamps, derived from where and when the board was created.
pub fn generate_node_id(path: &Path, created_at: &DateTime<Utc>) -> u32 {
    let input = format!("{}{}", path.display(), created_at.to_rfc3339());
    let hash = Sha256::digest(input.as_bytes());
    u32::from_be_bytes([hash[0], hash[1], hash[2], hash[3]])
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
