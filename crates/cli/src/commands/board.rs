// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::Workspace;
use crate::cli::OutputFormat;
use crate::display::{format_board, BoardView};
use crate::error::Result;

pub fn run(output: OutputFormat) -> Result<()> {
    let workspace = Workspace::open()?;
    let db = workspace.open_db()?;
    let store = workspace.load_store(&db)?;

    match output {
        OutputFormat::Json => {
            let view = BoardView::from_store(&store);
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        OutputFormat::Text | OutputFormat::Id => print!("{}", format_board(&store)),
    }
    Ok(())
}

pub fn columns() -> Result<()> {
    let workspace = Workspace::open()?;
    let db = workspace.open_db()?;
    let store = workspace.load_store(&db)?;

    for column in store.columns().iter() {
        println!(
            "{:<14} {:<14} {}",
            column.id,
            column.name,
            store.column_order(&column.id).len()
        );
    }
    Ok(())
}
