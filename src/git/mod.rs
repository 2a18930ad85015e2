//! Git operations, run as subprocesses.
//!
//! Every capability consumed from git is an opaque text-producing
//! command. Paths and revisions are always passed as discrete argv
//! entries, never interpolated into a shell string.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::debug;

pub mod changeset;
pub mod diff;

pub use changeset::discover;
pub use diff::FileDiff;

/// Runs `git` with the given arguments and returns trimmed stdout.
///
/// A non-zero exit status is an error carrying git's stderr.
pub async fn run_git(args: &[&str]) -> Result<String> {
    debug!(?args, "running git");

    let output = Command::new("git")
        .args(args)
        .output()
        .await
        .with_context(|| format!("Failed to execute git {}", args.join(" ")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("git {} failed: {}", args.join(" "), stderr.trim());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Resolves the repository root of the current working directory.
///
/// Fails when the working directory is not inside a git repository.
pub async fn repo_root() -> Result<PathBuf> {
    let root = run_git(&["rev-parse", "--show-toplevel"])
        .await
        .context("Not in a git repository")?;

    Ok(PathBuf::from(root))
}
