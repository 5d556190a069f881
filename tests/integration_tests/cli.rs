use crate::common::{TestRepo, stderr, stdout};

#[test]
fn exec_runs_in_the_worktree_with_phantom_env() {
    let repo = TestRepo::new();
    repo.run_ok(&["create", "feature"]);
    let path = repo.worktree_path("feature");

    let out = repo.run_ok(&[
        "exec",
        "feature",
        "sh",
        "-c",
        r#"echo "$PHANTOM:$PHANTOM_NAME:$PHANTOM_PATH""#,
    ]);
    assert_eq!(out.trim(), format!("1:feature:{}", path.display()));
}

#[test]
fn exec_passes_the_exit_code_through() {
    let repo = TestRepo::new();
    repo.run_ok(&["create", "feature"]);

    let output = repo.run(&["exec", "feature", "sh", "-c", "exit 7"]);
    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn create_with_exec_runs_the_command() {
    let repo = TestRepo::new();

    let output = repo.run(&["create", "feature", "--exec", "git branch --show-current; exit 5"]);
    assert_eq!(output.status.code(), Some(5), "{}", stderr(&output));
    assert!(stdout(&output).contains("feature"));
}

#[test]
fn launch_options_conflict_before_anything_is_created() {
    let repo = TestRepo::new();

    let output = repo.run(&["create", "feature", "--shell", "--exec", "true"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Cannot use --shell, --exec, and --tmux options together"));
    assert!(!repo.worktree_path("feature").exists());
}

#[test]
fn tmux_outside_tmux_is_rejected() {
    let repo = TestRepo::new();

    let output = repo.run(&["create", "feature", "--tmux"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("can only be used inside tmux"));
    assert!(!repo.worktree_path("feature").exists());
}

#[test]
fn delete_requires_exactly_one_target() {
    let repo = TestRepo::new();

    let output = repo.run(&["delete"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Please provide a worktree name to delete or use --current"));

    let output = repo.run(&["delete", "feature", "--current"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Cannot specify both a worktree name and --current"));
}

#[test]
fn outside_a_repository() {
    let repo = TestRepo::new();
    let outside = repo.scratch("not-a-repo");

    let output = repo.run_in(&outside, &["list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not a git repository"));
}

#[test]
fn directory_flag_selects_the_repository() {
    let repo = TestRepo::new();
    let outside = repo.scratch("elsewhere");

    let output = repo.run_in(
        &outside,
        &["-C", repo.root().to_str().unwrap(), "create", "feature"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(repo.worktree_path("feature").is_dir());
}

#[test]
fn version_matches_the_package() {
    let repo = TestRepo::new();
    let out = repo.run_ok(&["version"]);
    assert_eq!(out.trim(), format!("phantom {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn completion_script() {
    let repo = TestRepo::new();
    let out = repo.run_ok(&["completion", "bash"]);
    assert!(out.contains("phantom"));
    assert!(out.contains("attach"));
}
