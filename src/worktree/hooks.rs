//! Post-create and pre-delete command execution
//!
//! Commands run one at a time through the user's shell, inside the worktree.
//! The first command that cannot be started or exits non-zero stops the
//! sequence; later commands are never attempted.
//!
//! [`HookRun`] makes the sequence an explicit state machine:
//!
//! ```text
//! Pending -> Running(0) -> Running(1) -> ... -> Completed
//!                 \              \
//!                  +--------------+--> Failed { index, error }
//! ```

use std::path::Path;
use std::time::Instant;

use crate::process::{ProcessRunner, ProcessSpec};
use crate::shell_exec::ShellConfig;

/// When a hook list runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum HookPhase {
    PostCreate,
    PreDelete,
}

impl HookPhase {
    /// Capitalized label for the start of a sentence.
    pub fn label(self) -> &'static str {
        match self {
            HookPhase::PostCreate => "Post-create",
            HookPhase::PreDelete => "Pre-delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    /// The shell could not be started
    #[error("Failed to execute {phase} command \"{command}\": {message}")]
    Spawn {
        phase: HookPhase,
        command: String,
        message: String,
    },

    /// The command ran and exited non-zero
    #[error("{} command failed with exit code {}: {command}", .phase.label(), format_code(.code))]
    Exited {
        phase: HookPhase,
        command: String,
        code: Option<i32>,
    },
}

fn format_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

impl HookError {
    pub fn command(&self) -> &str {
        match self {
            HookError::Spawn { command, .. } | HookError::Exited { command, .. } => command,
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            HookError::Spawn { .. } => None,
            HookError::Exited { code, .. } => *code,
        }
    }
}

/// Explicit execution environment for hook commands.
#[derive(Debug, Clone, Copy)]
pub struct ExecOptions<'a> {
    pub shell: &'a ShellConfig,
    pub cwd: &'a Path,
    pub env: &'a [(String, String)],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookState {
    /// Nothing has run yet
    Pending,
    /// Command `index` is next
    Running(usize),
    /// Every command exited 0
    Completed,
    /// Command `index` failed; no later command ran
    Failed { index: usize, error: HookError },
}

impl HookState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, HookState::Completed | HookState::Failed { .. })
    }
}

/// One pass over an ordered command list.
#[derive(Debug)]
pub struct HookRun<'a> {
    phase: HookPhase,
    commands: &'a [String],
    state: HookState,
    executed: Vec<String>,
}

impl<'a> HookRun<'a> {
    pub fn new(phase: HookPhase, commands: &'a [String]) -> Self {
        Self {
            phase,
            commands,
            state: HookState::Pending,
            executed: Vec::new(),
        }
    }

    pub fn state(&self) -> &HookState {
        &self.state
    }

    /// Commands that exited 0, in order.
    pub fn executed(&self) -> &[String] {
        &self.executed
    }

    /// Advance one transition. Returns `false` once the run is terminal.
    pub fn step(&mut self, runner: &dyn ProcessRunner, exec: &ExecOptions<'_>) -> bool {
        let index = match self.state {
            HookState::Pending => {
                self.state = if self.commands.is_empty() {
                    HookState::Completed
                } else {
                    HookState::Running(0)
                };
                return !self.state.is_terminal();
            }
            HookState::Running(index) => index,
            HookState::Completed | HookState::Failed { .. } => return false,
        };

        let commands = self.commands;
        let command = &commands[index];
        match self.execute(runner, exec, command) {
            Ok(()) => {
                self.executed.push(command.clone());
                self.state = if index + 1 < self.commands.len() {
                    HookState::Running(index + 1)
                } else {
                    HookState::Completed
                };
            }
            Err(error) => self.state = HookState::Failed { index, error },
        }
        !self.state.is_terminal()
    }

    /// Drive the run to a terminal state.
    pub fn run_to_end(
        mut self,
        runner: &dyn ProcessRunner,
        exec: &ExecOptions<'_>,
    ) -> Result<Vec<String>, HookError> {
        while self.step(runner, exec) {}
        match self.state {
            HookState::Failed { error, .. } => Err(error),
            _ => Ok(self.executed),
        }
    }

    fn execute(
        &self,
        runner: &dyn ProcessRunner,
        exec: &ExecOptions<'_>,
        command: &str,
    ) -> Result<(), HookError> {
        log::info!("Executing {} command: {command}", self.phase);
        let spec = ProcessSpec::new(exec.shell.executable(), exec.cwd)
            .args(exec.shell.command_args(command))
            .envs(exec.env.to_vec())
            // Hooks may prompt (npm init, an editor), so they share the terminal
            .interactive(true);

        let started = Instant::now();
        let exit = runner.run(&spec).map_err(|e| HookError::Spawn {
            phase: self.phase,
            command: command.to_string(),
            message: format!("{e:#}"),
        })?;
        log::debug!("{} command finished in {:?}: {command}", self.phase, started.elapsed());

        if exit.success() {
            Ok(())
        } else {
            Err(HookError::Exited {
                phase: self.phase,
                command: command.to_string(),
                code: exit.code,
            })
        }
    }
}

/// Run `commands` in order, stopping at the first failure.
///
/// An empty list succeeds without running anything.
pub fn run_commands(
    runner: &dyn ProcessRunner,
    exec: &ExecOptions<'_>,
    phase: HookPhase,
    commands: &[String],
) -> Result<Vec<String>, HookError> {
    HookRun::new(phase, commands).run_to_end(runner, exec)
}
