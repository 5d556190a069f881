//! Process spawning
//!
//! [`ProcessRunner`] is how the core starts child processes: hook commands,
//! `exec`/`shell` sessions, and tmux. Lifecycle operations block until each
//! child exits. Interrupt handling is left to the terminal: Ctrl-C reaches
//! the child and phantom alike.

pub mod tmux;

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use anyhow::Context;

/// A single process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Added to (not replacing) the inherited environment
    pub env: Vec<(String, String)>,
    /// Interactive children get the terminal's stdin; others get `/dev/null`.
    pub interactive: bool,
}

impl ProcessSpec {
    pub fn new(program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            env: Vec::new(),
            interactive: false,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn envs(mut self, env: Vec<(String, String)>) -> Self {
        self.env.extend(env);
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    /// Exit code; for signal deaths on unix, `128 + signal`.
    pub code: Option<i32>,
}

impl ProcessExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ProcessExit {
    fn from(status: ExitStatus) -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self {
                    code: Some(128 + signal),
                };
            }
        }
        Self {
            code: status.code(),
        }
    }
}

/// Starts child processes and waits for them.
pub trait ProcessRunner: Send + Sync {
    /// Run to completion. `Err` means the process could not be started.
    fn run(&self, spec: &ProcessSpec) -> anyhow::Result<ProcessExit>;
}

/// [`ProcessRunner`] using `std::process` with inherited stdout/stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, spec: &ProcessSpec) -> anyhow::Result<ProcessExit> {
        log::debug!(
            "$ {} {} [{}]",
            spec.program.display(),
            spec.args.join(" "),
            spec.cwd.display()
        );

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .current_dir(&spec.cwd)
            .envs(spec.env.iter().map(|(k, v)| (k, v)));
        if !spec.interactive {
            cmd.stdin(Stdio::null());
        }

        let status = cmd
            .status()
            .with_context(|| format!("Failed to start {}", spec.program.display()))?;
        Ok(status.into())
    }
}

/// Environment exported to every process started inside a worktree.
pub fn phantom_env(name: &str, worktree_path: &Path) -> Vec<(String, String)> {
    vec![
        ("PHANTOM".to_string(), "1".to_string()),
        ("PHANTOM_NAME".to_string(), name.to_string()),
        (
            "PHANTOM_PATH".to_string(),
            worktree_path.to_string_lossy().into_owned(),
        ),
    ]
}
