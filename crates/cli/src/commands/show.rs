// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::Workspace;
use crate::cli::OutputFormat;
use crate::display::format_task;
use crate::error::Result;

pub fn run(id: &str, output: OutputFormat) -> Result<()> {
    let workspace = Workspace::open()?;
    let db = workspace.open_db()?;
    let task_id = db.resolve_id(&workspace.project(), id)?;
    let task = db.get_task(&task_id)?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&task)?),
        OutputFormat::Id => println!("{}", task.id),
        OutputFormat::Text => {
            let column = workspace
                .columns
                .get(&task.column_id)
                .map(|c| c.name.as_str())
                .unwrap_or(task.column_id.as_str());
            print!("{}", format_task(&task, column));
        }
    }
    Ok(())
}
