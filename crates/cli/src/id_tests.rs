// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use chrono::TimeZone;
use yare::parameterized;

#[test]
fn test_generate_id() {
    let created_at = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
    let id = generate_id("web", "Fix header", &created_at);
    assert!(id.starts_with("web-"));
    assert_eq!(id.len(), 12);
    assert_eq!(id, generate_id("web", "Fix header", &created_at));
}

#[test]
fn test_generate_unique_id_no_collision() {
    let created_at = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
    let base_id = generate_id("web", "Test", &created_at);
    let id = generate_unique_id("web", "Test", &created_at, |_| false);
    assert_eq!(id, base_id);
}

#[test]
fn test_generate_unique_id_multiple_collisions() {
    let created_at = Utc::now();
    let base_id = generate_id("web", "Test", &created_at);
    let collision_2 = format!("{}-2", base_id);

    let id = generate_unique_id("web", "Test", &created_at, |id| {
        id == base_id || id == collision_2
    });

    assert_eq!(id, format!("{}-3", base_id));
}

#[parameterized(
    simple = { "web", true },
    with_digits = { "app2", true },
    too_short = { "a", false },
    uppercase = { "Web", false },
    digits_only = { "42", false },
    dash = { "my-app", false },
)]
fn test_validate_project(project: &str, valid: bool) {
    assert_eq!(validate_project(project), valid);
}

#[parameterized(
    plain = { "/home/kit/website", Some("website") },
    mixed = { "/src/My-App_2", Some("myapp2") },
    no_letters = { "/tmp/2024", None },
    too_short = { "/tmp/x", None },
)]
fn test_derive_project(path: &str, expected: Option<&str>) {
    assert_eq!(derive_project(Path::new(path)).as_deref(), expected);
}

#[test]
fn test_node_id_depends_on_location() {
    let created_at = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
    let a = generate_node_id(Path::new("/a"), &created_at);
    let b = generate_node_id(Path::new("/b"), &created_at);
    assert_ne!(a, b);
    assert_eq!(a, generate_node_id(Path::new("/a"), &created_at));
}
