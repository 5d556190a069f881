//! Running programs inside worktrees: `exec`, `shell`, and the `--shell`,
//! `--exec` and `--tmux*` options of `create`/`attach`.

use std::path::Path;

use anyhow::Context;
use color_print::cformat;
use phantom::process::tmux::{self, TmuxDirection, TmuxSpec};
use phantom::process::{ProcessExit, ProcessRunner, ProcessSpec, phantom_env};
use phantom::styling::{info_message, println, success_message};
use phantom::worktree::error::EXIT_GENERAL_ERROR;
use phantom::worktree::worktree_path;

use super::context::Session;
use super::{CommandError, CommandResult};
use crate::cli::{OpenArgs, TmuxArgs};

/// What to start in a worktree once it exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Launch {
    Shell,
    Exec(String),
    Tmux(TmuxDirection),
}

fn chosen_directions(args: &TmuxArgs) -> Vec<TmuxDirection> {
    [
        (args.tmux, TmuxDirection::New),
        (args.tmux_vertical, TmuxDirection::Vertical),
        (args.tmux_horizontal, TmuxDirection::Horizontal),
    ]
    .into_iter()
    .filter_map(|(on, direction)| on.then_some(direction))
    .collect()
}

fn require_tmux(tmux_var: Option<&str>) -> Result<(), CommandError> {
    if !tmux::is_inside_tmux(tmux_var) {
        return Err(CommandError::usage(
            "The --tmux, --tmux-vertical, and --tmux-horizontal options can only be used inside tmux",
        ));
    }
    if !tmux::is_available() {
        return Err(anyhow::anyhow!("tmux is not installed or not in PATH").into());
    }
    Ok(())
}

/// The single tmux direction requested, if any.
pub(crate) fn tmux_direction(
    args: &TmuxArgs,
    tmux_var: Option<&str>,
) -> Result<Option<TmuxDirection>, CommandError> {
    match chosen_directions(args).as_slice() {
        [] => Ok(None),
        [direction] => {
            require_tmux(tmux_var)?;
            Ok(Some(*direction))
        }
        _ => Err(CommandError::usage(
            "Only one of --tmux, --tmux-vertical, and --tmux-horizontal can be used",
        )),
    }
}

/// Resolve `--shell`/`--exec`/`--tmux*` into at most one [`Launch`].
///
/// Checked before the worktree is created so a bad combination changes nothing.
pub(crate) fn resolve_launch(
    open: &OpenArgs,
    tmux: &TmuxArgs,
    tmux_var: Option<&str>,
) -> Result<Option<Launch>, CommandError> {
    let requested =
        usize::from(open.shell) + usize::from(open.exec.is_some()) + chosen_directions(tmux).len();
    if requested > 1 {
        return Err(CommandError::usage(
            "Cannot use --shell, --exec, and --tmux options together",
        ));
    }

    if open.shell {
        return Ok(Some(Launch::Shell));
    }
    if let Some(command) = &open.exec {
        return Ok(Some(Launch::Exec(command.clone())));
    }
    Ok(tmux_direction(tmux, tmux_var)?.map(Launch::Tmux))
}

pub(crate) fn tmux_var() -> Option<String> {
    std::env::var("TMUX").ok()
}

fn exit_code(exit: ProcessExit) -> i32 {
    exit.code.unwrap_or(EXIT_GENERAL_ERROR)
}

fn run_shell(session: &Session, name: &str, path: &Path) -> CommandResult {
    println!(
        "{}",
        info_message(cformat!(
            "Entering worktree '<bold>{name}</>' at {}",
            path.display()
        ))
    );
    let spec = ProcessSpec::new(session.shell.executable(), path)
        .envs(phantom_env(name, path))
        .interactive(true);
    let exit = session
        .runner
        .run(&spec)
        .with_context(|| format!("Failed to start {}", session.shell.name()))?;
    Ok(exit_code(exit))
}

fn open_in_tmux(
    session: &Session,
    name: &str,
    path: &Path,
    direction: TmuxDirection,
    command: &str,
    args: &[String],
) -> CommandResult {
    let spec = TmuxSpec {
        direction,
        command: command.to_string(),
        args: args.to_vec(),
        cwd: path.to_path_buf(),
        env: phantom_env(name, path),
        window_name: Some(name.to_string()),
    };
    tmux::spawn(&session.runner, &spec)?;
    println!(
        "{}",
        success_message(cformat!(
            "Opened worktree <bold>{name}</> in a new tmux {}",
            direction.surface()
        ))
    );
    Ok(0)
}

/// Start `launch` in the worktree at `path`; returns the exit code to use.
pub(crate) fn launch(session: &Session, name: &str, path: &Path, launch: Launch) -> CommandResult {
    match launch {
        Launch::Shell => run_shell(session, name, path),
        Launch::Exec(command) => {
            let spec = ProcessSpec::new(session.shell.executable(), path)
                .args(session.shell.command_args(&command))
                .envs(phantom_env(name, path))
                .interactive(true);
            let exit = session
                .runner
                .run(&spec)
                .with_context(|| format!("Failed to execute {command}"))?;
            Ok(exit_code(exit))
        }
        Launch::Tmux(direction) => {
            let shell = session.shell.executable().to_string_lossy().into_owned();
            open_in_tmux(session, name, path, direction, &shell, &[])
        }
    }
}

pub(crate) fn handle_exec(
    session: &Session,
    name: &str,
    command: &[String],
    tmux: &TmuxArgs,
) -> CommandResult {
    let Some((program, args)) = command.split_first() else {
        return Err(CommandError::usage("No command specified"));
    };
    let direction = tmux_direction(tmux, tmux_var().as_deref())?;
    let path = worktree_path(&session.context, name)?;

    if let Some(direction) = direction {
        return open_in_tmux(session, name, &path, direction, program, args);
    }

    let spec = ProcessSpec::new(program, &path)
        .args(args)
        .envs(phantom_env(name, &path))
        .interactive(true);
    let exit = session
        .runner
        .run(&spec)
        .with_context(|| format!("Failed to execute {program}"))?;
    Ok(exit_code(exit))
}

pub(crate) fn handle_shell(session: &Session, name: &str, tmux: &TmuxArgs) -> CommandResult {
    let direction = tmux_direction(tmux, tmux_var().as_deref())?;
    let path = worktree_path(&session.context, name)?;

    match direction {
        Some(direction) => launch(session, name, &path, Launch::Tmux(direction)),
        None => run_shell(session, name, &path),
    }
}
