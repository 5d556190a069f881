use std::path::{Path, PathBuf};

use anyhow::Context;
use phantom::PhantomContext;
use phantom::git::Repository;
use phantom::process::SystemProcessRunner;
use phantom::shell_exec::ShellConfig;
use phantom::styling::{eprintln, warning_message};
use phantom::worktree::OperationEnv;

use super::CommandError;

/// Everything a command handler needs for one invocation.
///
/// Resolves the repository from the invocation directory, loads its
/// configuration (printing any configuration warning), and picks the user's
/// shell. Built once; handlers borrow an [`OperationEnv`] from it.
pub(crate) struct Session {
    pub context: PhantomContext,
    pub repo: Repository,
    pub runner: SystemProcessRunner,
    pub shell: ShellConfig,
    /// Directory phantom was started in (after `-C`)
    pub cwd: PathBuf,
}

impl Session {
    pub(crate) fn open(directory: Option<&Path>) -> Result<Self, CommandError> {
        let current = std::env::current_dir().context("Failed to read current directory")?;
        let cwd = match directory {
            Some(dir) => current.join(dir),
            None => current,
        };

        let repo = Repository::discover(&cwd)?;
        let (context, warnings) = PhantomContext::build(repo.root());
        for warning in warnings {
            eprintln!("{}", warning_message(warning));
        }

        Ok(Self {
            context,
            repo,
            runner: SystemProcessRunner,
            shell: ShellConfig::from_env(),
            cwd,
        })
    }

    pub(crate) fn env(&self) -> OperationEnv<'_> {
        OperationEnv {
            context: &self.context,
            vcs: &self.repo,
            runner: &self.runner,
            shell: &self.shell,
        }
    }
}
