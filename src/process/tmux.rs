//! Tmux integration for opening worktrees in new windows or panes.

use std::borrow::Cow;
use std::path::PathBuf;

use super::{ProcessExit, ProcessRunner, ProcessSpec};

/// Check if tmux is available in PATH.
pub fn is_available() -> bool {
    which::which("tmux").is_ok()
}

/// Check if we're inside a tmux session, given the value of `$TMUX`.
pub fn is_inside_tmux(tmux_var: Option<&str>) -> bool {
    tmux_var.is_some_and(|v| !v.is_empty())
}

/// Where the new tmux surface opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum TmuxDirection {
    /// A new window
    New,
    /// A pane split above/below the current one
    Vertical,
    /// A pane split beside the current one
    Horizontal,
}

impl TmuxDirection {
    /// "window" or "pane", for messages.
    pub fn surface(self) -> &'static str {
        match self {
            TmuxDirection::New => "window",
            TmuxDirection::Vertical | TmuxDirection::Horizontal => "pane",
        }
    }
}

/// Sanitize a worktree name for a tmux window name.
///
/// Tmux doesn't allow certain characters in session/window names.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, '.' | ':') { '-' } else { c })
        .collect()
}

/// A program to start in a new tmux window or pane.
#[derive(Debug, Clone)]
pub struct TmuxSpec {
    pub direction: TmuxDirection,
    pub command: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: Vec<(String, String)>,
    /// Only used for [`TmuxDirection::New`]
    pub window_name: Option<String>,
}

impl TmuxSpec {
    /// Arguments for the `tmux` binary.
    pub fn tmux_args(&self) -> Vec<String> {
        let mut args: Vec<String> = match self.direction {
            TmuxDirection::New => vec!["new-window".into()],
            TmuxDirection::Vertical => vec!["split-window".into(), "-v".into()],
            TmuxDirection::Horizontal => vec!["split-window".into(), "-h".into()],
        };

        args.push("-c".into());
        args.push(self.cwd.to_string_lossy().into_owned());

        for (key, value) in &self.env {
            args.push("-e".into());
            args.push(format!("{key}={value}"));
        }

        if self.direction == TmuxDirection::New
            && let Some(name) = &self.window_name
        {
            args.push("-n".into());
            args.push(sanitize_name(name));
        }

        args.push(self.shell_command());
        args
    }

    /// Program and arguments as one shell-quoted string (tmux runs it via the shell).
    fn shell_command(&self) -> String {
        std::iter::once(&self.command)
            .chain(&self.args)
            .map(|part| shell_escape::escape(Cow::Borrowed(part.as_str())).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Open `spec` in tmux. Returns once tmux has created the window or pane.
pub fn spawn(runner: &dyn ProcessRunner, spec: &TmuxSpec) -> anyhow::Result<ProcessExit> {
    let process = ProcessSpec::new("tmux", &spec.cwd).args(spec.tmux_args());
    let exit = runner.run(&process)?;
    if !exit.success() {
        anyhow::bail!(
            "tmux failed to open a {} (exit code {})",
            spec.direction.surface(),
            exit.code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
        );
    }
    Ok(exit)
}
