//! Worktree path resolution and path display helpers.

use std::path::{Path, PathBuf};

/// Default location of worktrees, relative to the repository root.
pub const DEFAULT_WORKTREES_SUBDIR: [&str; 3] = [".git", "phantom", "worktrees"];

/// Resolve the directory that holds every worktree of a repository.
///
/// - absolute `override_dir`: returned unchanged
/// - relative `override_dir`: joined onto `repo_root`
/// - no override: `<repo_root>/.git/phantom/worktrees`
pub fn resolve_worktrees_directory(repo_root: &Path, override_dir: Option<&str>) -> PathBuf {
    match override_dir {
        Some(dir) if Path::new(dir).is_absolute() => PathBuf::from(dir),
        Some(dir) => repo_root.join(dir),
        None => DEFAULT_WORKTREES_SUBDIR
            .iter()
            .fold(repo_root.to_path_buf(), |acc, part| acc.join(part)),
    }
}

/// Path of the worktree `name` inside `worktrees_directory`.
///
/// Names may contain `/`, which produces nested directories. Leading `/` are
/// dropped, so `/x` is `<worktrees_directory>/x` rather than an absolute path.
/// An empty name resolves to `worktrees_directory` itself; callers reject
/// empty names before getting here.
pub fn resolve_worktree_path(worktrees_directory: &Path, name: &str) -> PathBuf {
    let relative = name.trim_start_matches('/');
    if relative.is_empty() {
        return worktrees_directory.to_path_buf();
    }
    worktrees_directory.join(relative)
}

/// Canonicalize a path without Windows verbatim prefix (`\\?\`).
///
/// On Windows, `std::fs::canonicalize()` returns verbatim paths like `\\?\C:\...`
/// which external tools like git cannot handle. The `dunce` crate strips this
/// prefix when safe. On Unix, this is equivalent to `std::fs::canonicalize()`.
pub fn canonicalize(path: &Path) -> std::io::Result<PathBuf> {
    dunce::canonicalize(path)
}

/// Get the user's home directory.
pub fn home_dir() -> Option<PathBuf> {
    home::home_dir()
}

/// Format a filesystem path for user-facing output.
///
/// Replaces home directory prefix with `~` (e.g., `/Users/alex/projects/app` -> `~/projects/app`).
/// Paths outside home are returned unchanged.
pub fn format_path_for_display(path: &Path) -> String {
    if let Some(home) = home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }

        let mut display_path = PathBuf::from("~");
        display_path.push(stripped);
        return display_path.display().to_string();
    }

    path.display().to_string()
}
