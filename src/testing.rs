//! In-memory doubles for [`VcsGateway`] and [`ProcessRunner`].

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::git::{VcsGateway, WorktreeInfo};
use crate::process::{ProcessExit, ProcessRunner, ProcessSpec};

/// Gateway that records every call and mirrors worktree mutations on disk.
///
/// `add_worktree`/`attach_worktree` create the directory and `remove_worktree`
/// deletes it, so existence checks behave as they would against git.
#[derive(Default)]
pub(crate) struct FakeGateway {
    calls: Mutex<Vec<String>>,
    branches: Mutex<HashSet<String>>,
    worktrees: Mutex<Vec<WorktreeInfo>>,
    changed_files: Mutex<HashMap<PathBuf, usize>>,
    failures: HashMap<&'static str, String>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_branch(self, branch: &str) -> Self {
        self.branches.lock().unwrap().insert(branch.to_string());
        self
    }

    /// Make `method` fail with `message`.
    pub fn failing(mut self, method: &'static str, message: &str) -> Self {
        self.failures.insert(method, message.to_string());
        self
    }

    pub fn set_changed_files(&self, path: &Path, count: usize) {
        self.changed_files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), count);
    }

    /// Register a worktree without touching the disk.
    pub fn push_worktree(&self, path: &Path, branch: Option<&str>) {
        self.worktrees.lock().unwrap().push(WorktreeInfo {
            path: path.to_path_buf(),
            branch: branch.map(str::to_string),
            bare: false,
        });
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that change repository state.
    pub fn mutations(&self) -> Vec<String> {
        const MUTATING: [&str; 5] = [
            "add_worktree",
            "attach_worktree",
            "remove_worktree",
            "delete_branch",
            "set_upstream_branch",
        ];
        self.calls()
            .into_iter()
            .filter(|call| MUTATING.iter().any(|m| call.starts_with(m)))
            .collect()
    }

    pub fn has_branch(&self, branch: &str) -> bool {
        self.branches.lock().unwrap().contains(branch)
    }

    fn record(&self, method: &'static str, detail: String) -> anyhow::Result<()> {
        let call = if detail.is_empty() {
            method.to_string()
        } else {
            format!("{method} {detail}")
        };
        self.calls.lock().unwrap().push(call);
        match self.failures.get(method) {
            Some(message) => Err(anyhow::anyhow!("{message}")),
            None => Ok(()),
        }
    }

    fn checkout(&self, path: &Path, branch: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path)?;
        self.push_worktree(path, Some(branch));
        Ok(())
    }
}

impl VcsGateway for FakeGateway {
    fn add_worktree(&self, path: &Path, branch: &str, base: &str) -> anyhow::Result<()> {
        self.record(
            "add_worktree",
            format!("{} {branch} {base}", path.display()),
        )?;
        self.branches.lock().unwrap().insert(branch.to_string());
        self.checkout(path, branch)
    }

    fn attach_worktree(&self, path: &Path, branch: &str) -> anyhow::Result<()> {
        self.record("attach_worktree", format!("{} {branch}", path.display()))?;
        self.checkout(path, branch)
    }

    fn branch_exists(&self, branch: &str) -> anyhow::Result<bool> {
        self.record("branch_exists", branch.to_string())?;
        Ok(self.has_branch(branch))
    }

    fn remove_worktree(&self, path: &Path, force: bool) -> anyhow::Result<()> {
        self.record("remove_worktree", format!("{} force={force}", path.display()))?;
        std::fs::remove_dir_all(path)?;
        self.worktrees.lock().unwrap().retain(|wt| wt.path != path);
        Ok(())
    }

    fn delete_branch(&self, branch: &str) -> anyhow::Result<()> {
        self.record("delete_branch", branch.to_string())?;
        self.branches.lock().unwrap().remove(branch);
        Ok(())
    }

    fn changed_file_count(&self, worktree: &Path) -> anyhow::Result<usize> {
        self.record("changed_file_count", worktree.display().to_string())?;
        Ok(self
            .changed_files
            .lock()
            .unwrap()
            .get(worktree)
            .copied()
            .unwrap_or(0))
    }

    fn current_branch(&self, worktree: &Path) -> anyhow::Result<Option<String>> {
        self.record("current_branch", worktree.display().to_string())?;
        Ok(self
            .worktrees
            .lock()
            .unwrap()
            .iter()
            .find(|wt| wt.path == worktree)
            .and_then(|wt| wt.branch.clone()))
    }

    fn list_worktrees(&self) -> anyhow::Result<Vec<WorktreeInfo>> {
        self.record("list_worktrees", String::new())?;
        Ok(self.worktrees.lock().unwrap().clone())
    }

    fn fetch(&self, remote: &str, refspec: Option<&str>) -> anyhow::Result<()> {
        self.record("fetch", format!("{remote} {}", refspec.unwrap_or("")))
    }

    fn set_upstream_branch(&self, branch: &str, upstream: &str) -> anyhow::Result<()> {
        self.record("set_upstream_branch", format!("{branch} {upstream}"))
    }
}

enum Scripted {
    Exit(i32),
    SpawnError(String),
}

/// Runner that records invocations and answers from a script.
///
/// Outcomes are keyed by the last argument (the shell command string for
/// hooks). Unscripted commands exit 0.
#[derive(Default)]
pub(crate) struct FakeRunner {
    calls: Mutex<Vec<ProcessSpec>>,
    script: HashMap<String, Scripted>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exit_with(mut self, command: &str, code: i32) -> Self {
        self.script.insert(command.to_string(), Scripted::Exit(code));
        self
    }

    pub fn fail_to_spawn(mut self, command: &str, message: &str) -> Self {
        self.script
            .insert(command.to_string(), Scripted::SpawnError(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<ProcessSpec> {
        self.calls.lock().unwrap().clone()
    }

    /// Last argument of each call, in order.
    pub fn commands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|spec| spec.args.last().cloned())
            .collect()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, spec: &ProcessSpec) -> anyhow::Result<ProcessExit> {
        self.calls.lock().unwrap().push(spec.clone());
        let key = spec.args.last().map(String::as_str).unwrap_or_default();
        match self.script.get(key) {
            Some(Scripted::Exit(code)) => Ok(ProcessExit { code: Some(*code) }),
            Some(Scripted::SpawnError(message)) => Err(anyhow::anyhow!("{message}")),
            None => Ok(ProcessExit { code: Some(0) }),
        }
    }
}
