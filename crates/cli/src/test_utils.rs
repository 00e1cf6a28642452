// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared unit test utilities.
//!
//! Provides git repository, bundle, and fake-binary helpers for unit tests
//! in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::bundle::git_command;

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Run git in `dir`, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) {
    let output = git_command().args(args).current_dir(dir).output().expect("failed to run git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Initialize a git repository with a configured user and `main` branch.
pub fn init_git_repo(dir: &Path) {
    git(dir, &["init", "--quiet", "--initial-branch=main"]);
    configure_identity(dir);
}

/// Give the repository at `dir` a local committer identity, independent of
/// the host's global git config.
pub fn configure_identity(dir: &Path) {
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "user.name", "Test User"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

/// Write files and commit them as `author`.
pub fn commit_files(dir: &Path, author: &str, files: &[(&str, &str)], message: &str) {
    create_tree(dir, files);
    git(dir, &["add", "--all"]);
    let author = format!("{author} <{author}@example.com>");
    git(dir, &["commit", "--quiet", "--author", &author, "-m", message]);
}

/// Build a small repository and write it as a bundle to `out`.
pub fn make_bundle(out: &Path) {
    let repo = TempDir::new().unwrap();
    init_git_repo(repo.path());
    commit_files(repo.path(), "alice", &[("main.go", "package main\n")], "initial");
    commit_files(repo.path(), "bob", &[("README.md", "# demo\n")], "docs");
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    git(repo.path(), &["bundle", "create", out.to_str().unwrap(), "--all"]);
}

/// Write an executable shell script to `dir/name`.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A stand-in analysis tool.
///
/// Requires `--repository <path>` first, exits 2 on the argument `bogus`,
/// otherwise prints its remaining arguments and the sorted working tree.
/// Writes noise to stderr on every run.
#[cfg(unix)]
pub fn fake_tool(dir: &Path) -> PathBuf {
    write_script(
        dir,
        "fake-tool",
        r#"echo "diagnostics" >&2
[ "$1" = "--repository" ] || exit 64
repo="$2"
shift 2
for arg in "$@"; do
    if [ "$arg" = "bogus" ]; then
        echo "unknown key: $arg" >&2
        exit 2
    fi
done
echo "args: $*"
cd "$repo" && LC_ALL=C ls
"#,
    )
}
