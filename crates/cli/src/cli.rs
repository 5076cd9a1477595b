// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Args, Parser, Subcommand, ValueEnum};
use kb_core::Priority;

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    s.parse::<Priority>().map_err(|e| e.to_string())
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Id,
}

#[derive(Parser)]
#[command(name = "kb")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A shared kanban board with drag-and-drop reordering")]
pub struct Cli {
    /// Run as if kb was started in <path>
    #[arg(short = 'C', long = "directory", global = true, value_name = "path")]
    pub directory: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Where a dragged task is dropped.
#[derive(Args, Clone, Debug)]
#[group(required = true, multiple = false)]
pub struct MoveTarget {
    /// Drop onto another task (takes its place)
    #[arg(long, value_name = "ID")]
    pub onto: Option<String>,

    /// Drop onto a column (goes to the end)
    #[arg(long, value_name = "COLUMN")]
    pub to: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a board in the current directory
    #[command(after_help = "\
Examples:
  kb init                                Project named after the directory
  kb init --project web                  Explicit project name
  kb init --remote ws://relay:7890       Share moves through a relay")]
    Init {
        /// Project name, also the prefix of task ids
        #[arg(long, short)]
        project: Option<String>,

        /// Relay URL (ws:// or wss://)
        #[arg(long)]
        remote: Option<String>,
    },

    /// Create a new task
    #[command(after_help = "\
Examples:
  kb new \"Fix header\"                    Create in the first column
  kb new \"Review copy\" -c in_review      Create in a given column
  kb new \"Ship\" -p urgent --due 2026-12-01
  kb new \"Task\" -o id                    Print only the new id")]
    New {
        #[arg(value_parser = non_empty_string)]
        title: String,

        /// Column to create the task in (default: first column)
        #[arg(long, short)]
        column: Option<String>,

        /// low, medium, high or urgent
        #[arg(long, short, value_parser = parse_priority)]
        priority: Option<Priority>,

        #[arg(long, short)]
        assignee: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        #[arg(long, short)]
        description: Option<String>,

        /// Output format (text, json, id)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show the board, column by column
    Board {
        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List the board's columns
    Columns,

    /// Show one task
    Show {
        id: String,

        /// Output format (text, json)
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Drag a task onto another task or a column
    #[command(after_help = "\
Examples:
  kb move web-1a2b --to in_progress      Move to the end of a column
  kb move web-1a2b --onto web-9f8e       Take web-9f8e's place
  kb move web-1a --to completed          Unique id prefixes are accepted")]
    Move {
        /// Task to drag
        id: String,

        #[command(flatten)]
        target: MoveTarget,
    },

    /// Edit a task's details
    #[command(after_help = "\
Examples:
  kb edit web-1a2b --title \"New title\"
  kb edit web-1a2b --assignee none       Clear the assignee
  kb edit web-1a2b --due none            Clear the due date")]
    Edit {
        id: String,

        #[arg(long, value_parser = non_empty_string)]
        title: Option<String>,

        /// New description ("none" clears it)
        #[arg(long)]
        description: Option<String>,

        /// New assignee ("none" clears it)
        #[arg(long)]
        assignee: Option<String>,

        #[arg(long, value_parser = parse_priority)]
        priority: Option<Priority>,

        /// New due date, YYYY-MM-DD ("none" clears it)
        #[arg(long)]
        due: Option<String>,
    },

    /// Delete a task
    Rm { id: String },

    /// Exchange moves with the relay
    Sync,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
