//! Scratch git repositories and a handle on the built `phantom` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

pub struct TestRepo {
    _dir: TempDir,
    root: PathBuf,
}

impl TestRepo {
    /// Repository on `main` with one commit.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = std::fs::canonicalize(dir.path()).unwrap().join("repo");
        std::fs::create_dir_all(&root).unwrap();

        let repo = Self { _dir: dir, root };
        repo.git(&["init", "--quiet"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo.commit_file("README.md", "# test\n", "Initial commit");
        repo
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sibling directory of the repository, inside the same scratch dir.
    pub fn scratch(&self, name: &str) -> PathBuf {
        let path = self.root.parent().unwrap().join(name);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn worktree_path(&self, name: &str) -> PathBuf {
        self.root.join(".git/phantom/worktrees").join(name)
    }

    /// Run git at the repository root; panics on failure.
    pub fn git(&self, args: &[&str]) -> String {
        self.git_in(&self.root, args)
    }

    pub fn git_in(&self, dir: &Path, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    pub fn commit_file(&self, path: &str, contents: &str, message: &str) {
        std::fs::write(self.root.join(path), contents).unwrap();
        self.git(&["add", path]);
        self.git(&["commit", "--quiet", "-m", message]);
    }

    pub fn write_config(&self, json: &str) {
        std::fs::write(self.root.join("phantom.config.json"), json).unwrap();
    }

    /// `phantom` with a predictable environment, run from the repository root.
    pub fn phantom(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_phantom"));
        cmd.current_dir(&self.root)
            .env("NO_COLOR", "1")
            .env("SHELL", "/bin/sh")
            .env_remove("TMUX")
            .env_remove("RUST_LOG")
            .env_remove("CLICOLOR_FORCE");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.run_in(&self.root, args)
    }

    pub fn run_in(&self, dir: &Path, args: &[&str]) -> Output {
        self.phantom().current_dir(dir).args(args).output().unwrap()
    }

    /// Run and require success; returns stdout.
    pub fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "phantom {} failed ({:?}): {}",
            args.join(" "),
            output.status.code(),
            stderr(&output)
        );
        stdout(&output)
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
