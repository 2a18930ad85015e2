//! Review orchestration.
//!
//! Drives the pipeline: resolve the repository root, discover the
//! staged change set, then fan out one independent unit of work per
//! qualifying file. Each unit fetches the file's diff, requests a
//! review, and prints its own result as soon as it is ready. A unit's
//! failure is reported and never aborts its siblings; only the fatal
//! stages before the fan-out affect the exit status.

use std::path::Path;

use anyhow::Result;
use futures::future::join_all;
use tracing::debug;

use crate::config::ReviewConfig;
use crate::git::{self, diff};
use crate::laas::LaasClient;

/// Longest changed-content preview echoed to the debug log.
const PREVIEW_LEN: usize = 100;

/// Terminal outcome of one per-file review unit.
#[derive(Debug)]
pub enum FileOutcome {
    /// Diff extraction yielded nothing to review.
    Skipped,
    /// The review was printed.
    Reported,
    /// Fetch or review failed; the error was printed without affecting
    /// sibling units.
    Failed(String),
}

/// Runs one full review pass over the staged change set.
pub async fn run(config: &ReviewConfig, client: &LaasClient) -> Result<()> {
    let repo_root = git::repo_root().await?;
    let files = git::discover(config).await?;

    if files.is_empty() {
        println!("No staged files to review.");
        return Ok(());
    }

    println!("Staged files queued for review:");
    for file in &files {
        println!("  - {file}");
    }

    let outcomes = review_files(&repo_root, &files, client).await;

    let (reported, skipped, failed) = summarize(&outcomes);
    println!("\n{reported} reviewed, {skipped} skipped, {failed} failed");

    // Per-file failures were already reported by their own units; they
    // do not change the run's exit status.
    Ok(())
}

/// Fans out one unit per file and joins them all before returning.
///
/// All units launch concurrently; results print in completion order,
/// each line carrying its file name.
pub async fn review_files(
    repo_root: &Path,
    files: &[String],
    client: &LaasClient,
) -> Vec<FileOutcome> {
    let futs = files
        .iter()
        .map(|file| review_one(repo_root, file, client));

    join_all(futs).await
}

/// Runs a single file's unit: fetch, skip-or-review, print.
async fn review_one(repo_root: &Path, file: &str, client: &LaasClient) -> FileOutcome {
    let file_diff = match diff::fetch(repo_root, file).await {
        Ok(d) => d,
        Err(e) => return fail(file, &e),
    };

    if !file_diff.is_reviewable() {
        debug!(file, "no staged content to review; skipping");
        return FileOutcome::Skipped;
    }

    debug!(
        file,
        delta = %truncate_preview(&file_diff.changed_content),
        "requesting review"
    );

    match client.review(&file_diff).await {
        Ok(review) => report(file, &review),
        Err(e) => fail(file, &e),
    }
}

fn report(file: &str, review: &str) -> FileOutcome {
    println!("\n\u{1f4c4} {file}\n{review}");
    FileOutcome::Reported
}

fn fail(file: &str, error: &anyhow::Error) -> FileOutcome {
    eprintln!("\u{274c} {file}: {error:#}");
    FileOutcome::Failed(format!("{error:#}"))
}

/// Counts (reported, skipped, failed) outcomes.
fn summarize(outcomes: &[FileOutcome]) -> (usize, usize, usize) {
    let mut reported = 0;
    let mut skipped = 0;
    let mut failed = 0;
    for outcome in outcomes {
        match outcome {
            FileOutcome::Reported => reported += 1,
            FileOutcome::Skipped => skipped += 1,
            FileOutcome::Failed(_) => failed += 1,
        }
    }
    (reported, skipped, failed)
}

/// Truncates a changed-content preview to [`PREVIEW_LEN`] characters.
fn truncate_preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_LEN {
        let head: String = content.chars().take(PREVIEW_LEN).collect();
        format!("{head}...")
    } else {
        content.to_string()
    }
}
