//! To-do CLI commands.
//!
//! Each mutating command returns whether the list changed so the caller can
//! resave the full collection.

use crate::domain::{TaskError, TaskList};
use anyhow::Result;
use std::io::Write;
use tracing::info;

const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn cmd_list(tasks: &TaskList, out: &mut impl Write) -> Result<()> {
    if tasks.is_empty() {
        writeln!(out, "No tasks. Use: add <task description>")?;
        return Ok(());
    }

    writeln!(out, "{:>3}  {:36}  {:4}  {:19}  Title", "#", "ID", "Done", "Created")?;
    writeln!(out, "{}", "-".repeat(86))?;
    for (pos, task) in tasks.sorted().into_iter().enumerate() {
        let done = if task.done { "✔" } else { " " };
        writeln!(
            out,
            "{:>3}  {:36}  [{}]   {:19}  {}",
            pos + 1,
            task.id,
            done,
            task.created_at.format(CREATED_FORMAT),
            task.title
        )?;
    }
    Ok(())
}

pub fn cmd_add(tasks: &mut TaskList, title: &str, out: &mut impl Write) -> Result<bool> {
    match tasks.add(title) {
        Ok(task) => {
            info!(id = %task.id, "task added");
            writeln!(out, "Added task: {} ({})", task.title, task.id)?;
            Ok(true)
        }
        Err(TaskError::EmptyTitle) => {
            writeln!(out, "Cannot add empty task.")?;
            Ok(false)
        }
        Err(e) => {
            writeln!(out, "{}", e)?;
            Ok(false)
        }
    }
}

pub fn cmd_done(tasks: &mut TaskList, reference: &str, out: &mut impl Write) -> Result<bool> {
    let result = tasks
        .resolve(reference)
        .and_then(|id| tasks.mark_done(&id).map(|t| (t.title.clone(), t.id.clone())));

    match result {
        Ok((title, id)) => {
            writeln!(out, "Marked done: {} ({})", title, id)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "{}", e)?;
            Ok(false)
        }
    }
}

pub fn cmd_delete(tasks: &mut TaskList, reference: &str, out: &mut impl Write) -> Result<bool> {
    match tasks.resolve(reference).and_then(|id| tasks.delete(&id)) {
        Ok(task) => {
            info!(id = %task.id, "task deleted");
            writeln!(out, "Deleted: {} ({})", task.title, task.id)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "{}", e)?;
            Ok(false)
        }
    }
}

pub fn cmd_edit(
    tasks: &mut TaskList,
    reference: &str,
    title: &str,
    out: &mut impl Write,
) -> Result<bool> {
    let result = tasks
        .resolve(reference)
        .and_then(|id| tasks.edit(&id, title).map(|t| (t.title.clone(), t.id.clone())));

    match result {
        Ok((title, id)) => {
            writeln!(out, "Updated: {} ({})", title, id)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "{}", e)?;
            Ok(false)
        }
    }
}

/// Remove everything, only when the user confirmed
pub fn cmd_clear(tasks: &mut TaskList, confirmed: bool, out: &mut impl Write) -> Result<bool> {
    if !confirmed {
        writeln!(out, "Aborted.")?;
        return Ok(false);
    }
    tasks.clear();
    info!("all tasks cleared");
    writeln!(out, "All tasks deleted.")?;
    Ok(true)
}

/// Whether a typed confirmation means yes
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}
