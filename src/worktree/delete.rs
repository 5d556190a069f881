use super::validate::{validate_name, worktree_exists};
use super::{HookPhase, OperationEnv, PhantomError};

#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteOptions {
    /// Delete even with uncommitted changes
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Multi-line summary, including any warning and branch note
    pub message: String,
    pub branch: String,
    pub branch_deleted: bool,
    pub has_uncommitted_changes: bool,
    /// Set only when uncommitted changes were discarded
    pub changed_files: Option<usize>,
    pub executed_commands: Vec<String>,
}

/// Remove worktree `name` and then its branch.
///
/// Refuses when the worktree has uncommitted changes unless forced. A
/// failing pre-delete command aborts before anything is removed. Failing to
/// delete the branch afterwards is reported in the message, not as an error.
pub fn delete(
    env: &OperationEnv<'_>,
    name: &str,
    options: DeleteOptions,
) -> Result<DeleteOutcome, PhantomError> {
    validate_name(name)?;
    let path = worktree_exists(&env.context.worktrees_directory, name)?;

    // An unreadable status counts as clean
    let changed_files = env.vcs.changed_file_count(&path).unwrap_or_else(|e| {
        log::debug!("Could not read status of {name}: {e:#}");
        0
    });
    let has_uncommitted_changes = changed_files > 0;
    if has_uncommitted_changes && !options.force {
        return Err(PhantomError::UncommittedChanges {
            name: name.to_string(),
            changed_files,
        });
    }

    let executed_commands = env
        .run_hooks(
            HookPhase::PreDelete,
            name,
            &path,
            env.context.config.pre_delete_commands(),
        )
        .map_err(|error| PhantomError::PreDeleteFailed {
            name: name.to_string(),
            error,
        })?;

    let branch = match env.vcs.current_branch(&path) {
        Ok(Some(branch)) => branch,
        _ => name.to_string(),
    };

    env.vcs
        .remove_worktree(&path, options.force)
        .map_err(|e| PhantomError::git("worktree remove failed", format!("{e:#}")))?;

    let (mut message, branch_deleted) = match env.vcs.delete_branch(&branch) {
        Ok(()) => (
            format!("Deleted worktree '{name}' and its branch '{branch}'"),
            true,
        ),
        Err(e) => {
            log::debug!("Keeping branch {branch}: {e:#}");
            (
                format!(
                    "Deleted worktree '{name}'\nNote: Branch '{branch}' could not be deleted: branch delete failed: {e:#}"
                ),
                false,
            )
        }
    };

    if has_uncommitted_changes {
        message = format!(
            "Warning: Worktree '{name}' had uncommitted changes ({changed_files} files)\n{message}"
        );
    }

    Ok(DeleteOutcome {
        message,
        branch,
        branch_deleted,
        has_uncommitted_changes,
        changed_files: has_uncommitted_changes.then_some(changed_files),
        executed_commands,
    })
}
