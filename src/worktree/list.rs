use std::path::{Path, PathBuf};

use normalize_path::NormalizePath;
use rayon::prelude::*;

use super::{OperationEnv, PhantomError};
use crate::path::canonicalize;

/// Branch shown for a worktree with a detached HEAD.
pub const DETACHED_BRANCH: &str = "(detached HEAD)";
/// Branch shown when the worktree's HEAD can't be read.
pub const UNKNOWN_BRANCH: &str = "unknown";

/// Point-in-time snapshot of one worktree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeRecord {
    /// Path relative to the worktrees directory, `/`-separated
    pub name: String,
    pub path: PathBuf,
    pub branch: String,
    pub is_clean: bool,
}

/// Every worktree git knows about that lives under the worktrees directory.
///
/// Branch and status are queried per worktree, in parallel. A failed branch
/// query shows as [`UNKNOWN_BRANCH`]; a failed status query counts as clean.
pub fn list(env: &OperationEnv<'_>) -> Result<Vec<WorktreeRecord>, PhantomError> {
    let worktrees = env
        .vcs
        .list_worktrees()
        .map_err(|e| PhantomError::git("Failed to list worktrees", format!("{e:#}")))?;

    let bases = directory_forms(&env.context.worktrees_directory);
    let candidates: Vec<(String, PathBuf)> = worktrees
        .into_iter()
        .filter_map(|wt| relative_name(&bases, &wt.path).map(|name| (name, wt.path)))
        .collect();

    let records = candidates
        .into_par_iter()
        .map(|(name, path)| {
            let branch = match env.vcs.current_branch(&path) {
                Ok(Some(branch)) => branch,
                Ok(None) => DETACHED_BRANCH.to_string(),
                Err(e) => {
                    log::debug!("Could not read branch of {name}: {e:#}");
                    UNKNOWN_BRANCH.to_string()
                }
            };
            let is_clean = env
                .vcs
                .changed_file_count(&path)
                .map_or(true, |count| count == 0);
            WorktreeRecord {
                name,
                path,
                branch,
                is_clean,
            }
        })
        .collect();

    Ok(records)
}

/// The configured directory as written (lexically normalized) and as
/// resolved on disk; git may report either form.
pub(super) fn directory_forms(dir: &Path) -> Vec<PathBuf> {
    let normalized = dir.normalize();
    let mut forms = vec![normalized.clone()];
    if let Ok(canonical) = canonicalize(&normalized)
        && canonical != normalized
    {
        forms.push(canonical);
    }
    forms
}

pub(super) fn relative_name(bases: &[PathBuf], path: &Path) -> Option<String> {
    let path = path.normalize();
    bases.iter().find_map(|base| {
        let relative = path.strip_prefix(base).ok()?;
        if relative.as_os_str().is_empty() {
            return None;
        }
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        Some(parts.join("/"))
    })
}
