// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use clap::CommandFactory;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("kb").chain(args.iter().copied()))
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn move_needs_exactly_one_target() {
    assert!(parse(&["move", "web-1"]).is_err());
    assert!(parse(&["move", "web-1", "--to", "todo", "--onto", "web-2"]).is_err());

    let cli = parse(&["move", "web-1", "--onto", "web-2"]).unwrap();
    let Command::Move { id, target } = cli.command else {
        panic!("expected move");
    };
    assert_eq!(id, "web-1");
    assert_eq!(target.onto.as_deref(), Some("web-2"));
    assert!(target.to.is_none());
}

#[test]
fn new_parses_priority_and_rejects_blank_titles() {
    let cli = parse(&["new", "Ship it", "-p", "URGENT", "-o", "id"]).unwrap();
    let Command::New {
        priority, output, ..
    } = cli.command
    else {
        panic!("expected new");
    };
    assert_eq!(priority, Some(Priority::Urgent));
    assert_eq!(output, OutputFormat::Id);

    assert!(parse(&["new", "   "]).is_err());
    assert!(parse(&["new", "x", "-p", "someday"]).is_err());
}

#[test]
fn directory_flag_is_global() {
    let cli = parse(&["board", "-C", "/tmp/board"]).unwrap();
    assert_eq!(cli.directory.as_deref(), Some("/tmp/board"));
}
