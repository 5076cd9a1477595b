// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! kbrs - A shared kanban board with drag-and-drop reordering.
//!
//! This crate provides the `kb` CLI on top of `kb-core`: a board lives in
//! a `.kanban/` directory next to the code it tracks, and moves are shared
//! with other clients through a `kb-remote` relay.
//!
//! # Main Components
//!
//! - [`Config`] - Board configuration (project, columns, relay)
//! - [`sync`] - Relay client, offline queue and the broadcast outbox
//! - [`Error`] - Error types for all commands

mod cli;
mod commands;
mod display;

pub mod config;
pub mod error;
pub mod id;
pub mod sync;

pub use cli::{Cli, Command, MoveTarget, OutputFormat};
pub use config::{find_board_dir, init_board_dir, Config, RemoteConfig};
pub use error::{Error, Result};

use commands::edit::Changes;
use commands::new::NewTask;

/// Execute a parsed command line. `-C` is applied before anything else.
pub fn run(cli: Cli) -> Result<()> {
    if let Some(dir) = &cli.directory {
        std::env::set_current_dir(dir)?;
    }
    run_command(cli.command)
}

fn run_command(command: Command) -> Result<()> {
    match command {
        Command::Init { project, remote } => commands::init::run(project, remote),
        Command::New {
            title,
            column,
            priority,
            assignee,
            due,
            description,
            output,
        } => commands::new::run(
            NewTask {
                title,
                column,
                priority,
                assignee,
                due,
                description,
            },
            output,
        ),
        Command::Board { output } => commands::board::run(output),
        Command::Columns => commands::board::columns(),
        Command::Show { id, output } => commands::show::run(&id, output),
        Command::Move { id, target } => commands::r#move::run(&id, target),
        Command::Edit {
            id,
            title,
            description,
            assignee,
            priority,
            due,
        } => commands::edit::run(
            &id,
            Changes {
                title,
                description,
                assignee,
                priority,
                due,
            },
        ),
        Command::Rm { id } => commands::rm::run(&id),
        Command::Sync => commands::sync::run(),
    }
}
