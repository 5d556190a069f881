//! Worktree lifecycle: create, attach, delete, list, and locate.
//!
//! Every operation takes an [`OperationEnv`] bundling the per-invocation
//! context with its collaborators (git, the process runner, the shell), and
//! returns a typed result or a [`PhantomError`]. Operations never print;
//! presentation is the caller's job.

mod attach;
pub mod copy;
mod create;
mod delete;
pub mod error;
pub mod hooks;
mod list;
mod locate;
pub mod validate;

use std::path::Path;

pub use attach::{AttachOptions, AttachOutcome, attach};
pub use copy::{CopyError, CopyOutcome};
pub use create::{CreateOptions, CreateOutcome, create};
pub use delete::{DeleteOptions, DeleteOutcome, delete};
pub use error::PhantomError;
pub use hooks::{HookError, HookPhase};
pub use list::{DETACHED_BRANCH, UNKNOWN_BRANCH, WorktreeRecord, list};
pub use locate::{worktree_at, worktree_path};

use crate::context::PhantomContext;
use crate::git::VcsGateway;
use crate::process::{ProcessRunner, phantom_env};
use crate::shell_exec::ShellConfig;
use hooks::{ExecOptions, run_commands};

/// Everything a lifecycle operation needs, passed explicitly.
#[derive(Clone, Copy)]
pub struct OperationEnv<'a> {
    pub context: &'a PhantomContext,
    pub vcs: &'a dyn VcsGateway,
    pub runner: &'a dyn ProcessRunner,
    pub shell: &'a ShellConfig,
}

/// Copies and commands that ran after a worktree was checked out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostCreateReport {
    pub copied_files: Vec<String>,
    pub skipped_files: Vec<String>,
    /// Copy failures are reported, never fatal
    pub copy_error: Option<CopyError>,
    pub executed_commands: Vec<String>,
}

impl OperationEnv<'_> {
    fn run_hooks(
        &self,
        phase: HookPhase,
        name: &str,
        path: &Path,
        commands: &[String],
    ) -> Result<Vec<String>, HookError> {
        if commands.is_empty() {
            return Ok(Vec::new());
        }
        let env = phantom_env(name, path);
        let exec = ExecOptions {
            shell: self.shell,
            cwd: path,
            env: &env,
        };
        run_commands(self.runner, &exec, phase, commands)
    }

    /// Copy files, then run post-create commands, in a fresh worktree.
    ///
    /// `explicit_copy_files` come first, followed by configured entries not
    /// already listed.
    fn post_create(
        &self,
        name: &str,
        path: &Path,
        explicit_copy_files: &[String],
    ) -> Result<PostCreateReport, PhantomError> {
        let config = &self.context.config;
        let mut report = PostCreateReport::default();

        let mut copy_list: Vec<String> = Vec::new();
        for entry in explicit_copy_files
            .iter()
            .chain(config.post_create_copy_files())
        {
            if !copy_list.contains(entry) {
                copy_list.push(entry.clone());
            }
        }

        if !copy_list.is_empty() {
            match copy::copy_files(self.context.repo_root(), path, &copy_list) {
                Ok(outcome) => {
                    report.copied_files = outcome.copied;
                    report.skipped_files = outcome.skipped;
                }
                Err(error) => {
                    log::debug!("Failed to copy some files into {name}: {error}");
                    report.copied_files = error.outcome.copied.clone();
                    report.skipped_files = error.outcome.skipped.clone();
                    report.copy_error = Some(error);
                }
            }
        }

        report.executed_commands = self
            .run_hooks(
                HookPhase::PostCreate,
                name,
                path,
                config.post_create_commands(),
            )
            .map_err(|error| PhantomError::PostCreateFailed {
                name: name.to_string(),
                path: path.to_path_buf(),
                error,
            })?;

        Ok(report)
    }
}
