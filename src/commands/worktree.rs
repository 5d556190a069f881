//! `create`, `attach`, and `delete`.

use color_print::cformat;
use phantom::git::Repository;
use phantom::styling::{eprintln, info_message, println, success_message, warning_message};
use phantom::worktree::{
    AttachOptions, CreateOptions, DeleteOptions, PostCreateReport, attach, create, delete,
    worktree_at,
};

use super::context::Session;
use super::process::{launch, resolve_launch, tmux_var};
use super::{CommandError, CommandResult};
use crate::cli::{OpenArgs, TmuxArgs};

const NOT_IN_WORKTREE: &str =
    "Not in a worktree directory. The --current option can only be used from within a worktree.";

fn print_post_create(report: &PostCreateReport) {
    if !report.copied_files.is_empty() {
        println!(
            "{}",
            info_message(format!("Copied {}", report.copied_files.join(", ")))
        );
    }
    if !report.skipped_files.is_empty() {
        log::info!("Not present, skipped: {}", report.skipped_files.join(", "));
    }
    if let Some(error) = &report.copy_error {
        eprintln!(
            "{}",
            warning_message(format!("Failed to copy some files: {error}"))
        );
    }
    for command in &report.executed_commands {
        println!("{}", info_message(cformat!("Ran <bold>{command}</>")));
    }
}

pub(crate) fn handle_create(
    session: &Session,
    name: &str,
    base: Option<String>,
    copy_files: Vec<String>,
    open: &OpenArgs,
    tmux: &TmuxArgs,
) -> CommandResult {
    let then = resolve_launch(open, tmux, tmux_var().as_deref())?;

    let options = CreateOptions {
        branch: None,
        base,
        copy_files,
    };
    let outcome = create(&session.env(), name, options)?;

    println!("{}", success_message(&outcome.message));
    print_post_create(&outcome.post_create);

    match then {
        Some(then) => launch(session, name, &outcome.path, then),
        None => Ok(0),
    }
}

pub(crate) fn handle_attach(
    session: &Session,
    name: &str,
    copy_files: Vec<String>,
    open: &OpenArgs,
) -> CommandResult {
    let then = resolve_launch(open, &TmuxArgs::default(), None)?;

    let outcome = attach(&session.env(), name, AttachOptions { copy_files })?;

    println!(
        "{}",
        success_message(format!(
            "Attached worktree '{name}' at {}",
            outcome.path.display()
        ))
    );
    print_post_create(&outcome.post_create);

    match then {
        Some(then) => launch(session, name, &outcome.path, then),
        None => Ok(0),
    }
}

/// Name of the worktree containing the invocation directory.
fn current_worktree_name(session: &Session) -> Result<String, CommandError> {
    let toplevel =
        Repository::toplevel_of(&session.cwd).map_err(|_| CommandError::usage(NOT_IN_WORKTREE))?;
    worktree_at(&session.context, &toplevel).ok_or_else(|| CommandError::usage(NOT_IN_WORKTREE))
}

pub(crate) fn handle_delete(
    session: &Session,
    name: Option<&str>,
    force: bool,
    current: bool,
) -> CommandResult {
    let name = match (name, current) {
        (Some(_), true) => {
            return Err(CommandError::usage(
                "Cannot specify both a worktree name and --current",
            ));
        }
        (None, false) => {
            return Err(CommandError::usage(
                "Please provide a worktree name to delete or use --current",
            ));
        }
        (Some(name), false) => name.to_string(),
        (None, true) => current_worktree_name(session)?,
    };

    let outcome = delete(&session.env(), &name, DeleteOptions { force })?;

    for line in outcome.message.lines() {
        if let Some(warning) = line.strip_prefix("Warning: ") {
            eprintln!("{}", warning_message(warning));
        } else if let Some(note) = line.strip_prefix("Note: ") {
            eprintln!("{}", warning_message(note));
        } else {
            println!("{}", success_message(line));
        }
    }
    Ok(0)
}
