//! Git access for worktree lifecycle operations.
//!
//! [`VcsGateway`] is the seam between lifecycle operations and version
//! control: it captures the handful of mutations and queries phantom needs,
//! at the operation level rather than the command level. [`Repository`]
//! implements it by shelling out to the `git` CLI.

mod error;
mod parse;
mod repository;

use std::path::{Path, PathBuf};

pub use error::GitError;
pub use parse::count_status_lines;
pub use repository::Repository;

/// One entry of `git worktree list --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeInfo {
    pub path: PathBuf,
    /// Branch name without `refs/heads/`. `None` for detached HEAD.
    pub branch: Option<String>,
    pub bare: bool,
}

/// Version-control operations consumed by the lifecycle operations.
///
/// Every method returns a typed outcome; implementations never print.
/// Mutual exclusion between concurrent invocations is left to git's own
/// lock files, so a racing invocation surfaces as an ordinary error here.
pub trait VcsGateway: Send + Sync {
    /// Create a worktree at `path` on a new branch `branch` starting at `base`.
    fn add_worktree(&self, path: &Path, branch: &str, base: &str) -> anyhow::Result<()>;

    /// Create a worktree at `path` for the existing branch `branch`.
    fn attach_worktree(&self, path: &Path, branch: &str) -> anyhow::Result<()>;

    /// Whether a local branch named `branch` exists.
    fn branch_exists(&self, branch: &str) -> anyhow::Result<bool>;

    /// Remove the worktree at `path`; `force` discards local modifications.
    fn remove_worktree(&self, path: &Path, force: bool) -> anyhow::Result<()>;

    /// Delete a local branch regardless of merge status.
    fn delete_branch(&self, branch: &str) -> anyhow::Result<()>;

    /// Number of entries reported by `git status --porcelain` in `worktree`.
    fn changed_file_count(&self, worktree: &Path) -> anyhow::Result<usize>;

    /// Branch checked out in `worktree`; `None` when HEAD is detached.
    fn current_branch(&self, worktree: &Path) -> anyhow::Result<Option<String>>;

    /// Every non-bare worktree of the repository, main checkout first.
    fn list_worktrees(&self) -> anyhow::Result<Vec<WorktreeInfo>>;

    /// Fetch `refspec` (or the remote's default refspecs) from `remote`.
    fn fetch(&self, remote: &str, refspec: Option<&str>) -> anyhow::Result<()>;

    /// Make `upstream` the tracking branch of `branch`.
    fn set_upstream_branch(&self, branch: &str, upstream: &str) -> anyhow::Result<()>;
}
