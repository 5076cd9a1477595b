// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    not_initialized = { Error::NotInitialized, "kb init" },
    invalid_project = { Error::InvalidProject, "lowercase alphanumeric" },
    invalid_remote = { Error::InvalidRemoteUrl("http://x".into()), "ws://" },
    invalid_date = { Error::InvalidDate("soon".into()), "YYYY-MM-DD" },
    field_empty = { Error::FieldEmpty { field: "title" }, "title cannot be empty" },
    nothing_to_edit = { Error::NothingToEdit, "--title" },
    no_remote = { Error::NoRemote, "kb init --remote" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn core_lookup_errors_are_mapped() {
    let err: Error = kb_core::Error::TaskNotFound("kb-1".into()).into();
    assert!(matches!(err, Error::TaskNotFound(id) if id == "kb-1"));

    let err: Error = kb_core::Error::AmbiguousId {
        prefix: "kb-a".into(),
        matches: vec!["kb-a1".into(), "kb-a2".into()],
    }
    .into();
    assert!(matches!(err, Error::AmbiguousId { matches, .. } if matches.len() == 2));
}

#[test]
fn other_core_errors_keep_their_message() {
    let err: Error = kb_core::Error::ColumnNotFound("backlog".into(), "todo".into()).into();
    assert!(matches!(err, Error::Core(_)));
    assert!(err.to_string().contains("backlog"));
    assert!(err.to_string().contains("hint"));
}
