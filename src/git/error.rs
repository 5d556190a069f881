//! Errors raised by the git gateway.

use std::path::PathBuf;

use crate::path::format_path_for_display;

/// Failures talking to git.
///
/// Lifecycle operations wrap these into
/// [`PhantomError::Worktree`](crate::worktree::PhantomError::Worktree) with the
/// name of the operation that failed, so the `Display` text is kept to git's
/// own message.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GitError {
    /// Directory is not inside a git repository
    #[error("not a git repository: {}", format_path_for_display(path))]
    NotARepository { path: PathBuf },

    /// git exited non-zero
    #[error("{}", failure_text(command, stderr))]
    CommandFailed { command: String, stderr: String },

    /// Parse error (for git output parsing failures)
    #[error("{message}")]
    ParseError { message: String },

    /// Generic error with custom message
    #[error("{message}")]
    Other { message: String },
}

fn failure_text(command: &str, stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        format!("git {command} failed")
    } else {
        trimmed.to_string()
    }
}
