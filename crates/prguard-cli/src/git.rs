//! Thin wrappers over the `git` binary.

use anyhow::Context;
use camino::Utf8Path;
use prguard_types::RepoPath;
use std::process::Command;

/// Files modified between `base` and `head`. Added, deleted and renamed files are excluded.
pub fn changed_files(repo_root: &Utf8Path, base: &str, head: &str) -> anyhow::Result<Vec<RepoPath>> {
    let stdout = run_git(
        repo_root,
        &[
            "diff",
            "--name-only",
            "--diff-filter=M",
            &format!("{base}..{head}"),
        ],
    )?;

    Ok(stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(RepoPath::new)
        .collect())
}

/// Unified diff between `base` and `head`.
pub fn unified_diff(repo_root: &Utf8Path, base: &str, head: &str) -> anyhow::Result<String> {
    run_git(
        repo_root,
        &["diff", "--no-color", "--no-ext-diff", &format!("{base}..{head}")],
    )
}

fn run_git(repo_root: &Utf8Path, args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new("git")
        .current_dir(repo_root)
        .args(args)
        .output()
        .context("spawn git")?;

    if !output.status.success() {
        anyhow::bail!(
            "git {} returned {}: {}",
            args.join(" "),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
