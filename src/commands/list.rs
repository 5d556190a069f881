//! `list` and `where`.

use phantom::styling::{BRANCH, DIRTY, NAME, info_message, println};
use phantom::worktree::{WorktreeRecord, list, worktree_path};

use super::CommandResult;
use super::context::Session;

/// One line per worktree: `<name padded> (<branch>)[ dirty]`.
pub(crate) fn format_records(records: &[WorktreeRecord]) -> Vec<String> {
    let width = records
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0);

    records
        .iter()
        .map(|record| {
            let dirty = if record.is_clean {
                String::new()
            } else {
                format!(" {DIRTY}dirty{DIRTY:#}")
            };
            format!(
                "{NAME}{:<width$}{NAME:#} ({BRANCH}{}{BRANCH:#}){dirty}",
                record.name, record.branch
            )
        })
        .collect()
}

pub(crate) fn handle_list(session: &Session, names_only: bool) -> CommandResult {
    let records = list(&session.env())?;

    if names_only {
        for record in &records {
            println!("{}", record.name);
        }
        return Ok(0);
    }

    if records.is_empty() {
        println!("{}", info_message("No worktrees found."));
        return Ok(0);
    }

    for line in format_records(&records) {
        println!("{line}");
    }
    Ok(0)
}

pub(crate) fn handle_where(session: &Session, name: &str) -> CommandResult {
    let path = worktree_path(&session.context, name)?;
    println!("{}", path.display());
    Ok(0)
}
