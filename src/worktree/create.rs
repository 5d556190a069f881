use std::path::PathBuf;

use super::validate::{validate_name, worktree_absent};
use super::{OperationEnv, PhantomError, PostCreateReport};

/// Ref a new branch starts from when no base is given.
pub const DEFAULT_BASE: &str = "HEAD";

#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Branch to create; defaults to the worktree name
    pub branch: Option<String>,
    /// Starting point; defaults to [`DEFAULT_BASE`]
    pub base: Option<String>,
    /// Copied in addition to `postCreate.copyFiles`
    pub copy_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
    pub path: PathBuf,
    pub branch: String,
    pub message: String,
    pub post_create: PostCreateReport,
}

/// Create worktree `name` on a new branch.
///
/// Steps: validate the name, make sure the worktrees directory exists, check
/// the target path is free, `git worktree add -b`, copy files, then run
/// post-create commands. A post-create command failure is returned as
/// [`PhantomError::PostCreateFailed`]; the worktree stays on disk.
pub fn create(
    env: &OperationEnv<'_>,
    name: &str,
    options: CreateOptions,
) -> Result<CreateOutcome, PhantomError> {
    validate_name(name)?;

    let worktrees_directory = &env.context.worktrees_directory;
    std::fs::create_dir_all(worktrees_directory).map_err(|e| PhantomError::Worktree {
        message: format!(
            "Failed to create worktrees directory {}: {e}",
            worktrees_directory.display()
        ),
    })?;

    let path = worktree_absent(worktrees_directory, name)?;
    let branch = options.branch.unwrap_or_else(|| name.to_string());
    let base = options.base.as_deref().unwrap_or(DEFAULT_BASE);

    log::info!("Creating worktree {name} on {branch} from {base}");
    env.vcs
        .add_worktree(&path, &branch, base)
        .map_err(|e| PhantomError::git("worktree add failed", format!("{e:#}")))?;

    let post_create = env.post_create(name, &path, &options.copy_files)?;

    Ok(CreateOutcome {
        message: format!("Created worktree '{name}' at {}", path.display()),
        path,
        branch,
        post_create,
    })
}
