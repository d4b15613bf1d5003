//! Integration tests for the clone pipeline against local git repositories.
//!
//! These tests shell out to the real `git` binary using `file://` remotes,
//! so no network access is required. They are skipped (with a note) when
//! git is not installed.

use std::fs;
use std::path::Path;
use std::process::Command;

use repo_sweep::cloner::{CloneOrchestrator, FailureMode, GitCloneRunner};
use repo_sweep::error::Error;
use repo_sweep::output::OutputConfig;
use repo_sweep::reader::FileStreamer;
use repo_sweep::repository::Repository;
use tempfile::TempDir;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Create a source repository with one committed README.
fn init_source_repo(path: &Path, readme: &str) {
    fs::create_dir_all(path).unwrap();
    let git = |args: &[&str]| {
        let output = Command::new("git")
            .args(args)
            .current_dir(path)
            .env("GIT_AUTHOR_NAME", "fixture")
            .env("GIT_AUTHOR_EMAIL", "fixture@example.com")
            .env("GIT_COMMITTER_NAME", "fixture")
            .env("GIT_COMMITTER_EMAIL", "fixture@example.com")
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    };
    git(&["init", "--quiet"]);
    fs::write(path.join("README.md"), readme).unwrap();
    git(&["add", "."]);
    git(&["commit", "--quiet", "-m", "fixture commit"]);
}

fn file_url(path: &Path) -> Repository {
    Repository::from_clone_url(&format!("file://{}", path.display())).unwrap()
}

fn orchestrator(mode: FailureMode) -> CloneOrchestrator {
    CloneOrchestrator::new(mode, OutputConfig::from_env_and_flag("never"))
}

/// Three repositories, one worker, all cloned; read mode then prints every
/// committed file exactly once and nothing from .git.
#[test]
fn test_end_to_end_clone_and_read() {
    if !git_available() {
        eprintln!("skipping: git not installed");
        return;
    }

    let sources = TempDir::new().unwrap();
    init_source_repo(&sources.path().join("alpha"), "alpha readme contents");
    init_source_repo(&sources.path().join("bravo"), "bravo readme contents");
    init_source_repo(&sources.path().join("charlie"), "charlie readme contents");

    let repositories = vec![
        file_url(&sources.path().join("alpha")),
        file_url(&sources.path().join("bravo")),
        file_url(&sources.path().join("charlie")),
    ];

    let dest = TempDir::new().unwrap();
    let root = dest.path().join("acme");
    let runner = GitCloneRunner::locate(false).unwrap();
    orchestrator(FailureMode::FailFast)
        .run(&runner, &repositories, &root)
        .unwrap();

    for name in ["alpha", "bravo", "charlie"] {
        assert!(root.join(name).join("README.md").is_file());
    }

    let streamer = FileStreamer::new().unwrap();
    let mut out = Vec::new();
    streamer.stream(&root, &mut out).unwrap();
    let printed = String::from_utf8(out).unwrap();

    for name in ["alpha", "bravo", "charlie"] {
        assert_eq!(
            printed.matches(&format!("{} readme contents", name)).count(),
            1
        );
    }
    // Nothing from the clones' .git directories is printed.
    assert!(!printed.contains("[core]"));
}

/// A failing clone aborts the run with a clone error; the repositories
/// processed before it remain on disk.
#[test]
fn test_failing_clone_aborts_the_run() {
    if !git_available() {
        eprintln!("skipping: git not installed");
        return;
    }

    let sources = TempDir::new().unwrap();
    init_source_repo(&sources.path().join("alpha"), "alpha readme contents");

    let repositories = vec![
        file_url(&sources.path().join("alpha")),
        // Never created; git clone exits non-zero.
        file_url(&sources.path().join("missing")),
    ];

    let dest = TempDir::new().unwrap();
    let root = dest.path().join("acme");
    let runner = GitCloneRunner::locate(false).unwrap();
    let result = orchestrator(FailureMode::FailFast).run(&runner, &repositories, &root);

    match result {
        Err(Error::GitClone { url, .. }) => assert!(url.ends_with("missing")),
        other => panic!("expected GitClone error, got {:?}", other),
    }
    // The clone that finished before the failure is still on disk.
    assert!(root.join("alpha").join("README.md").is_file());
}

/// Keep-going mode clones what it can and reports the rest.
#[test]
fn test_keep_going_reports_aggregate_failures() {
    if !git_available() {
        eprintln!("skipping: git not installed");
        return;
    }

    let sources = TempDir::new().unwrap();
    init_source_repo(&sources.path().join("alpha"), "alpha readme contents");
    init_source_repo(&sources.path().join("bravo"), "bravo readme contents");

    let repositories = vec![
        file_url(&sources.path().join("alpha")),
        file_url(&sources.path().join("missing")),
        file_url(&sources.path().join("bravo")),
    ];

    let dest = TempDir::new().unwrap();
    let root = dest.path().join("acme");
    let runner = GitCloneRunner::locate(false).unwrap();
    let result = orchestrator(FailureMode::KeepGoing).run(&runner, &repositories, &root);

    match result {
        Err(Error::CloneFailures { failures }) => {
            assert_eq!(failures.len(), 1);
            assert!(failures[0].0.ends_with("missing"));
        }
        other => panic!("expected CloneFailures, got {:?}", other),
    }
    assert!(root.join("alpha").join("README.md").is_file());
    assert!(root.join("bravo").join("README.md").is_file());
}
