//! Errors returned by lifecycle operations
//!
//! Every operation returns `Result<_, PhantomError>`. Validation and
//! precondition failures are returned before anything is mutated; git
//! failures are wrapped with the name of the step that failed; hook failures
//! keep the underlying [`HookError`] so the exit code survives.

use std::path::PathBuf;

use color_print::cformat;

use super::hooks::HookError;
use crate::path::format_path_for_display;
use crate::styling::{error_message, hint_message};

/// Exit code for unexpected failures.
pub const EXIT_GENERAL_ERROR: i32 = 1;
/// Exit code when the named worktree or branch does not exist.
pub const EXIT_NOT_FOUND: i32 = 2;
/// Exit code for invalid input and violated preconditions.
pub const EXIT_VALIDATION_ERROR: i32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum PhantomError {
    /// Name fails the syntax rules; raised before any filesystem access
    #[error("{reason}")]
    InvalidName { reason: String },

    /// Create/attach target directory is already occupied
    #[error("Worktree '{name}' already exists")]
    AlreadyExists { name: String },

    /// Delete/where target directory does not exist
    #[error("Worktree '{name}' not found")]
    NotFound { name: String },

    /// Attach target branch does not exist
    #[error("Branch '{branch}' not found")]
    BranchNotFound { branch: String },

    /// Delete refused because the worktree has local modifications
    #[error(
        "Worktree '{name}' has uncommitted changes ({changed_files} files). Use --force to delete anyway."
    )]
    UncommittedChanges { name: String, changed_files: usize },

    /// Git failure, with the failing step as prefix
    #[error("{message}")]
    Worktree { message: String },

    /// The worktree was created, then a post-create command failed
    #[error("{error}")]
    PostCreateFailed {
        name: String,
        path: PathBuf,
        #[source]
        error: HookError,
    },

    /// A pre-delete command failed; nothing was removed
    #[error("{error}")]
    PreDeleteFailed {
        name: String,
        #[source]
        error: HookError,
    },
}

impl PhantomError {
    pub(crate) fn invalid_name(reason: impl Into<String>) -> Self {
        PhantomError::InvalidName {
            reason: reason.into(),
        }
    }

    /// Wrap a git failure as `<step>: <git message>`.
    pub(crate) fn git(step: &str, error: impl std::fmt::Display) -> Self {
        PhantomError::Worktree {
            message: format!("{step}: {error}"),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PhantomError::InvalidName { .. }
            | PhantomError::AlreadyExists { .. }
            | PhantomError::UncommittedChanges { .. } => EXIT_VALIDATION_ERROR,
            PhantomError::NotFound { .. } | PhantomError::BranchNotFound { .. } => EXIT_NOT_FOUND,
            PhantomError::PostCreateFailed { error, .. } => error
                .exit_code()
                .filter(|code| *code != 0)
                .unwrap_or(EXIT_GENERAL_ERROR),
            // An aborted delete is a plain failure, whatever the hook exited with
            PhantomError::PreDeleteFailed { .. } | PhantomError::Worktree { .. } => {
                EXIT_GENERAL_ERROR
            }
        }
    }

    /// Message with emoji and colors, plus a hint where one helps.
    pub fn styled(&self) -> String {
        let headline = error_message(self.to_string());
        match self {
            PhantomError::UncommittedChanges { name, .. } => format!(
                "{headline}\n{}",
                hint_message(cformat!("Run <bold>phantom delete {name} --force</> to discard them"))
            ),
            PhantomError::PostCreateFailed { name, path, .. } => format!(
                "{headline}\n{}",
                hint_message(cformat!(
                    "Worktree <bold>{name}</> was still created at {}",
                    format_path_for_display(path)
                ))
            ),
            PhantomError::PreDeleteFailed { name, .. } => format!(
                "{headline}\n{}",
                hint_message(cformat!("Worktree <bold>{name}</> was left untouched"))
            ),
            _ => headline,
        }
    }
}
