//! Shell selection for hook and `exec` commands
//!
//! Commands from configuration are strings interpreted by a shell. The shell
//! is an explicit value handed to the core by the caller; only
//! [`ShellConfig::from_env`], called by the CLI, looks at `$SHELL`.

use std::path::{Path, PathBuf};

/// Shell configuration for command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Path to the shell executable
    pub executable: PathBuf,
    /// Arguments to pass before the command (e.g., ["-c"] for sh)
    pub args: Vec<String>,
}

impl ShellConfig {
    /// A POSIX-style shell invoked as `<executable> -c <command>`.
    pub fn posix(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            args: vec!["-c".to_string()],
        }
    }

    /// The invoking user's shell: `$SHELL`, else the platform default.
    pub fn from_env() -> Self {
        match std::env::var_os("SHELL") {
            Some(shell) if !shell.is_empty() => Self::posix(shell),
            _ => Self::platform_default(),
        }
    }

    #[cfg(unix)]
    pub fn platform_default() -> Self {
        Self::posix("/bin/sh")
    }

    /// Git Bash when available, PowerShell otherwise.
    #[cfg(windows)]
    pub fn platform_default() -> Self {
        match which::which("bash") {
            Ok(bash) => Self::posix(bash),
            Err(_) => Self {
                executable: PathBuf::from("powershell.exe"),
                args: vec!["-NoProfile".to_string(), "-Command".to_string()],
            },
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Arguments that make the shell run `shell_command`.
    pub fn command_args(&self, shell_command: &str) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(shell_command.to_string());
        args
    }

    /// Short name for messages (`zsh`, `sh`, ...).
    pub fn name(&self) -> String {
        self.executable
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.executable.display().to_string())
    }
}
