//! Name and existence checks run before any lifecycle mutation.

use std::path::{Path, PathBuf};

use super::PhantomError;
use crate::path::resolve_worktree_path;

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/')
}

/// Check `name` against the worktree-name syntax.
///
/// Pure string check: never touches the filesystem.
pub fn validate_name(name: &str) -> Result<(), PhantomError> {
    if name.trim().is_empty() {
        return Err(PhantomError::invalid_name("Worktree name cannot be empty"));
    }
    if !name.chars().all(is_allowed_char) {
        return Err(PhantomError::invalid_name(
            "Worktree name can only contain letters, numbers, hyphens, underscores, dots, and slashes",
        ));
    }
    if name.contains("..") {
        return Err(PhantomError::invalid_name(
            "Worktree name cannot contain consecutive dots",
        ));
    }
    Ok(())
}

// Any metadata failure (permission denied, ENOTDIR, ...) counts as "absent".
// This can report a false "absent" on create; kept as the observed behavior.
fn probe(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// The worktree `name` must exist. Returns its path.
pub fn worktree_exists(worktrees_directory: &Path, name: &str) -> Result<PathBuf, PhantomError> {
    let path = resolve_worktree_path(worktrees_directory, name);
    if probe(&path) {
        Ok(path)
    } else {
        Err(PhantomError::NotFound {
            name: name.to_string(),
        })
    }
}

/// The worktree `name` must not exist yet. Returns the path it will occupy.
pub fn worktree_absent(worktrees_directory: &Path, name: &str) -> Result<PathBuf, PhantomError> {
    let path = resolve_worktree_path(worktrees_directory, name);
    if probe(&path) {
        Err(PhantomError::AlreadyExists {
            name: name.to_string(),
        })
    } else {
        Ok(path)
    }
}
