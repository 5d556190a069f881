//! [`VcsGateway`] backed by the `git` command line.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::Context;

use super::{GitError, VcsGateway, WorktreeInfo, count_status_lines};
use crate::path::{canonicalize, format_path_for_display};

/// A git repository, addressed by the root of its main checkout.
#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    /// Repository rooted at `root` (no validation).
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the repository containing `dir`.
    ///
    /// Resolves to the main checkout even when `dir` is inside a linked
    /// worktree, so every invocation agrees on where worktrees live.
    pub fn discover(dir: &Path) -> anyhow::Result<Self> {
        let output = git_output(
            dir,
            &["rev-parse", "--path-format=absolute", "--git-common-dir"],
        )?;
        if !output.status.success() {
            return Err(GitError::NotARepository {
                path: dir.to_path_buf(),
            }
            .into());
        }

        let common_dir = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        let root = match common_dir.parent() {
            Some(parent) if common_dir.file_name().is_some_and(|name| name == ".git") => {
                parent.to_path_buf()
            }
            // Bare repository: the common dir is the repository
            _ => common_dir.clone(),
        };

        let root = canonicalize(&root).unwrap_or(root);
        log::debug!("Repository root: {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Top level of the checkout containing `dir` (main checkout or linked worktree).
    pub fn toplevel_of(dir: &Path) -> anyhow::Result<PathBuf> {
        let stdout = run_git(dir, &["rev-parse", "--show-toplevel"])?;
        let path = PathBuf::from(stdout.trim());
        Ok(canonicalize(&path).unwrap_or(path))
    }

    /// Run a git command at the repository root and return stdout.
    pub fn run_command(&self, args: &[&str]) -> anyhow::Result<String> {
        run_git(&self.root, args)
    }

    /// Run a git command in another directory (e.g. a linked worktree).
    pub fn run_command_in(&self, dir: &Path, args: &[&str]) -> anyhow::Result<String> {
        run_git(dir, args)
    }
}

fn path_arg(path: &Path) -> anyhow::Result<&str> {
    path.to_str().ok_or_else(|| {
        GitError::Other {
            message: format!(
                "Worktree path contains invalid UTF-8: {}",
                format_path_for_display(path)
            ),
        }
        .into()
    })
}

fn git_output(dir: &Path, args: &[&str]) -> anyhow::Result<Output> {
    log::debug!("$ git {} [{}]", args.join(" "), dir.display());
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("Failed to execute git {}", args.join(" ")))
}

fn run_git(dir: &Path, args: &[&str]) -> anyhow::Result<String> {
    let output = git_output(dir, args)?;
    if !output.status.success() {
        return Err(GitError::CommandFailed {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
        .into());
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

impl VcsGateway for Repository {
    fn add_worktree(&self, path: &Path, branch: &str, base: &str) -> anyhow::Result<()> {
        self.run_command(&["worktree", "add", path_arg(path)?, "-b", branch, base])?;
        Ok(())
    }

    fn attach_worktree(&self, path: &Path, branch: &str) -> anyhow::Result<()> {
        self.run_command(&["worktree", "add", path_arg(path)?, branch])?;
        Ok(())
    }

    fn branch_exists(&self, branch: &str) -> anyhow::Result<bool> {
        let reference = format!("refs/heads/{branch}");
        let output = git_output(
            &self.root,
            &["show-ref", "--verify", "--quiet", &reference],
        )?;
        Ok(output.status.success())
    }

    fn remove_worktree(&self, path: &Path, force: bool) -> anyhow::Result<()> {
        let mut args = vec!["worktree", "remove"];
        if force {
            args.push("--force");
        }
        args.push(path_arg(path)?);
        self.run_command(&args)?;
        Ok(())
    }

    fn delete_branch(&self, branch: &str) -> anyhow::Result<()> {
        self.run_command(&["branch", "-D", branch])?;
        Ok(())
    }

    fn changed_file_count(&self, worktree: &Path) -> anyhow::Result<usize> {
        let stdout = self.run_command_in(worktree, &["status", "--porcelain"])?;
        Ok(count_status_lines(&stdout))
    }

    fn current_branch(&self, worktree: &Path) -> anyhow::Result<Option<String>> {
        let stdout = self.run_command_in(worktree, &["branch", "--show-current"])?;
        let branch = stdout.trim();
        Ok((!branch.is_empty()).then(|| branch.to_string()))
    }

    fn list_worktrees(&self) -> anyhow::Result<Vec<WorktreeInfo>> {
        let stdout = self.run_command(&["worktree", "list", "--porcelain"])?;
        let worktrees = WorktreeInfo::parse_porcelain_list(&stdout)?;
        Ok(worktrees.into_iter().filter(|wt| !wt.bare).collect())
    }

    fn fetch(&self, remote: &str, refspec: Option<&str>) -> anyhow::Result<()> {
        let mut args = vec!["fetch", remote];
        args.extend(refspec);
        self.run_command(&args)
            .map_err(|e| anyhow::anyhow!("git fetch failed: {e}"))?;
        Ok(())
    }

    fn set_upstream_branch(&self, branch: &str, upstream: &str) -> anyhow::Result<()> {
        self.run_command(&["branch", "--set-upstream-to", upstream, branch])
            .map_err(|e| anyhow::anyhow!("Failed to set upstream branch: {e}"))?;
        Ok(())
    }
}
