use std::path::PathBuf;

use super::validate::{validate_name, worktree_absent};
use super::{OperationEnv, PhantomError, PostCreateReport};

#[derive(Debug, Clone, Default)]
pub struct AttachOptions {
    /// Copied in addition to `postCreate.copyFiles`
    pub copy_files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachOutcome {
    pub path: PathBuf,
    pub post_create: PostCreateReport,
}

/// Check out the existing branch `name` in a new worktree of the same name.
pub fn attach(
    env: &OperationEnv<'_>,
    name: &str,
    options: AttachOptions,
) -> Result<AttachOutcome, PhantomError> {
    validate_name(name)?;
    let path = worktree_absent(&env.context.worktrees_directory, name)?;

    let exists = env
        .vcs
        .branch_exists(name)
        .map_err(|e| PhantomError::git("branch lookup failed", format!("{e:#}")))?;
    if !exists {
        return Err(PhantomError::BranchNotFound {
            branch: name.to_string(),
        });
    }

    log::info!("Attaching worktree {name} to existing branch");
    env.vcs
        .attach_worktree(&path, name)
        .map_err(|e| PhantomError::git("worktree add failed", format!("{e:#}")))?;

    let post_create = env.post_create(name, &path, &options.copy_files)?;
    Ok(AttachOutcome { path, post_create })
}
