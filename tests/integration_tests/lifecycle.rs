use crate::common::{TestRepo, stderr, stdout};

#[test]
fn create_where_list_delete() {
    let repo = TestRepo::new();
    let path = repo.worktree_path("feature");

    let out = repo.run_ok(&["create", "feature"]);
    assert!(out.contains(&format!("Created worktree 'feature' at {}", path.display())));
    assert!(path.join("README.md").is_file());
    assert_eq!(repo.git_in(&path, &["branch", "--show-current"]), "feature");

    assert_eq!(repo.run_ok(&["where", "feature"]).trim(), path.display().to_string());

    let list = repo.run_ok(&["list"]);
    assert!(list.contains("feature (feature)"), "{list}");
    assert!(!list.contains("dirty"));

    let out = repo.run_ok(&["delete", "feature"]);
    assert!(out.contains("Deleted worktree 'feature' and its branch 'feature'"));
    assert!(!path.exists());
    assert_eq!(repo.git(&["branch", "--list", "feature"]), "");
}

#[test]
fn create_from_base() {
    let repo = TestRepo::new();
    repo.git(&["branch", "release"]);
    repo.commit_file("later.txt", "later\n", "Later commit");

    repo.run_ok(&["create", "hotfix", "--base", "release"]);
    let path = repo.worktree_path("hotfix");
    assert!(!path.join("later.txt").exists());
    assert_eq!(
        repo.git_in(&path, &["rev-parse", "HEAD"]),
        repo.git(&["rev-parse", "release"])
    );
}

#[test]
fn nested_names_create_nested_directories() {
    let repo = TestRepo::new();
    repo.run_ok(&["create", "issues/42"]);
    assert!(repo.worktree_path("issues/42").is_dir());

    let names = repo.run_ok(&["list", "--names"]);
    assert_eq!(names.lines().collect::<Vec<_>>(), ["issues/42"]);
}

#[test]
fn create_twice_is_rejected() {
    let repo = TestRepo::new();
    repo.run_ok(&["create", "feature"]);

    let output = repo.run(&["create", "feature"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Worktree 'feature' already exists"));
}

#[test]
fn invalid_names_change_nothing() {
    let repo = TestRepo::new();
    for name in ["bad name", "../escape", "a..b"] {
        let output = repo.run(&["create", name]);
        assert_eq!(output.status.code(), Some(3), "{name}");
    }
    assert!(!repo.root().join(".git/phantom").exists());
    assert_eq!(repo.git(&["branch", "--list"]), "* main");
}

#[test]
fn attach_existing_branch() {
    let repo = TestRepo::new();
    repo.git(&["branch", "topic"]);

    let out = repo.run_ok(&["attach", "topic"]);
    let path = repo.worktree_path("topic");
    assert!(out.contains(&format!("Attached worktree 'topic' at {}", path.display())));
    assert_eq!(repo.git_in(&path, &["branch", "--show-current"]), "topic");
}

#[test]
fn attach_missing_branch() {
    let repo = TestRepo::new();
    let output = repo.run(&["attach", "nope"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Branch 'nope' not found"));
    assert!(!repo.worktree_path("nope").exists());
}

#[test]
fn delete_dirty_worktree_needs_force() {
    let repo = TestRepo::new();
    repo.run_ok(&["create", "feature"]);
    let path = repo.worktree_path("feature");
    std::fs::write(path.join("scratch.txt"), "wip").unwrap();

    let list = repo.run_ok(&["list"]);
    assert!(list.contains("dirty"), "{list}");

    let output = repo.run(&["delete", "feature"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("has uncommitted changes (1 files)"));
    assert!(path.exists());

    let output = repo.run(&["delete", "feature", "--force"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Deleted worktree 'feature' and its branch 'feature'"));
    assert!(stderr(&output).contains("Worktree 'feature' had uncommitted changes (1 files)"));
    assert!(!path.exists());
}

#[test]
fn delete_removes_checked_out_branch() {
    let repo = TestRepo::new();
    repo.run_ok(&["create", "feature"]);
    let path = repo.worktree_path("feature");
    repo.git_in(&path, &["switch", "--quiet", "-c", "renamed"]);

    let out = repo.run_ok(&["delete", "feature"]);
    assert!(out.contains("its branch 'renamed'"), "{out}");
    assert_eq!(repo.git(&["branch", "--list", "renamed"]), "");
    // The branch the worktree started on is left alone
    assert_eq!(repo.git(&["branch", "--list", "feature"]), "feature");
}

#[test]
fn delete_current_worktree() {
    let repo = TestRepo::new();
    repo.run_ok(&["create", "feature"]);
    let path = repo.worktree_path("feature");
    let nested = path.join("src");
    std::fs::create_dir_all(&nested).unwrap();

    let output = repo.run_in(&nested, &["delete", "--current"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Deleted worktree 'feature'"));
    assert!(!path.exists());
}

#[test]
fn delete_current_outside_worktree() {
    let repo = TestRepo::new();
    let output = repo.run(&["delete", "--current"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("Not in a worktree directory"));
}

#[test]
fn missing_worktree_is_not_found() {
    let repo = TestRepo::new();
    for args in [
        &["where", "ghost"][..],
        &["delete", "ghost"][..],
        &["exec", "ghost", "true"][..],
    ] {
        let output = repo.run(args);
        assert_eq!(output.status.code(), Some(2), "{args:?}");
        assert!(stderr(&output).contains("Worktree 'ghost' not found"));
    }
}

#[test]
fn list_without_worktrees() {
    let repo = TestRepo::new();
    assert!(repo.run_ok(&["list"]).contains("No worktrees found."));
    assert_eq!(repo.run_ok(&["list", "--names"]), "");
}

#[test]
fn list_ignores_worktrees_outside_the_directory() {
    let repo = TestRepo::new();
    let outside = repo.scratch("elsewhere");
    repo.git(&[
        "worktree",
        "add",
        outside.join("manual").to_str().unwrap(),
        "-b",
        "manual",
    ]);
    repo.run_ok(&["create", "alpha"]);
    repo.run_ok(&["create", "beta"]);

    let names = repo.run_ok(&["list", "--names"]);
    let mut names: Vec<_> = names.lines().collect();
    names.sort_unstable();
    assert_eq!(names, ["alpha", "beta"]);
}

#[test]
fn commands_work_from_inside_a_worktree() {
    let repo = TestRepo::new();
    repo.run_ok(&["create", "alpha"]);
    let inside = repo.worktree_path("alpha");

    let output = repo.run_in(&inside, &["create", "beta"]);
    assert!(output.status.success(), "{}", stderr(&output));
    // Worktrees always land under the main checkout
    assert!(repo.worktree_path("beta").is_dir());
    assert!(!inside.join(".git/phantom").exists());
}

#[test]
fn configured_worktrees_directory() {
    let repo = TestRepo::new();
    repo.write_config(r#"{ "worktreesDirectory": "../trees" }"#);

    let out = repo.run_ok(&["create", "feature"]);
    let expected = repo.root().parent().unwrap().join("trees/feature");
    assert!(expected.join("README.md").is_file(), "{out}");
    assert!(repo.run_ok(&["list", "--names"]).contains("feature"));

    repo.run_ok(&["delete", "feature"]);
    assert!(!expected.exists());
}

#[test]
fn leading_slash_names_stay_in_the_worktrees_directory() {
    let repo = TestRepo::new();
    let outside = repo.scratch("outside");
    let name = outside.join("evil").display().to_string();

    // Branch names cannot start with `/`, so git refuses; nothing lands outside
    let output = repo.run(&["create", &name]);
    assert!(!outside.join("evil").exists(), "{}", stderr(&output));

    let output = repo.run(&["where", "/ghost"]);
    assert_eq!(output.status.code(), Some(2));

    repo.run_ok(&["create", "feature"]);
    assert_eq!(
        repo.run_ok(&["where", "/feature"]).trim(),
        repo.worktree_path("feature").display().to_string()
    );
}
