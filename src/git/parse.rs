//! Git output parsing functions

use std::path::PathBuf;

use super::{GitError, WorktreeInfo};

fn missing(what: &str) -> GitError {
    GitError::ParseError {
        message: format!("{what} line missing value"),
    }
}

impl WorktreeInfo {
    /// Parse `git worktree list --porcelain`.
    ///
    /// Each record starts with a `worktree <path>` line. Only the branch and
    /// the bare marker are kept; `HEAD`, `detached`, `locked` and `prunable`
    /// lines are skipped, as is anything before the first record.
    pub(crate) fn parse_porcelain_list(output: &str) -> anyhow::Result<Vec<Self>> {
        let mut worktrees: Vec<WorktreeInfo> = Vec::new();

        for line in output.lines().filter(|line| !line.is_empty()) {
            let (key, value) = match line.split_once(' ') {
                Some((key, value)) => (key, Some(value)),
                None => (line, None),
            };

            if key == "worktree" {
                let path = value.ok_or_else(|| missing("worktree"))?;
                worktrees.push(WorktreeInfo {
                    path: PathBuf::from(path),
                    branch: None,
                    bare: false,
                });
                continue;
            }

            let Some(current) = worktrees.last_mut() else {
                continue;
            };
            match key {
                "branch" => {
                    let reference = value.ok_or_else(|| missing("branch"))?;
                    let name = reference.strip_prefix("refs/heads/").unwrap_or(reference);
                    current.branch = Some(name.to_string());
                }
                "bare" => current.bare = true,
                _ => {}
            }
        }

        Ok(worktrees)
    }
}

/// Count the entries in `git status --porcelain` output.
pub fn count_status_lines(output: &str) -> usize {
    output.lines().filter(|line| !line.trim().is_empty()).count()
}
