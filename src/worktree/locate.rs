use std::path::{Path, PathBuf};

use super::list::{directory_forms, relative_name};
use super::validate::{validate_name, worktree_exists};
use super::PhantomError;
use crate::context::PhantomContext;
use crate::path::canonicalize;

/// Path of the existing worktree `name`.
pub fn worktree_path(context: &PhantomContext, name: &str) -> Result<PathBuf, PhantomError> {
    validate_name(name)?;
    worktree_exists(&context.worktrees_directory, name)
}

/// Name of the worktree whose checkout is rooted at `toplevel`, if any.
///
/// Used by `delete --current`, where `toplevel` is the top level of the
/// checkout the user is standing in.
pub fn worktree_at(context: &PhantomContext, toplevel: &Path) -> Option<String> {
    let bases = directory_forms(&context.worktrees_directory);
    relative_name(&bases, toplevel).or_else(|| {
        let canonical = canonicalize(toplevel).ok()?;
        relative_name(&bases, &canonical)
    })
}
