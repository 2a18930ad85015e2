//! Staged change-set discovery.

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::ReviewConfig;
use crate::git::run_git;

/// Lists the staged Added/Copied/Modified paths that qualify for
/// review, in the order git reports them.
///
/// An empty result is not an error; it means there is nothing to
/// review.
pub async fn discover(config: &ReviewConfig) -> Result<Vec<String>> {
    let listing = run_git(&[
        "diff",
        "--cached",
        "--name-only",
        "HEAD",
        "--diff-filter=ACM",
    ])
    .await
    .context("Failed to list staged files")?;

    let files = filter_paths(&listing, &config.file_extensions);
    debug!(count = files.len(), "discovered staged files");

    Ok(files)
}

/// Splits a newline-separated listing and retains only non-empty paths
/// ending with one of the configured suffixes. Matching is exact and
/// case-sensitive, not a glob.
fn filter_paths(listing: &str, extensions: &[String]) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| extensions.iter().any(|ext| line.ends_with(ext.as_str())))
        .map(ToString::to_string)
        .collect()
}
