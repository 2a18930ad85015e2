//! Per-file staged diff retrieval.

use std::path::Path;

use anyhow::{Context, Result};

use crate::git::run_git;

/// The two views of one staged file that are sent for review.
#[derive(Debug, Clone, Default)]
pub struct FileDiff {
    /// Complete current on-disk text of the file.
    pub full_content: String,
    /// Only the added/removed lines of the staged patch, with diff
    /// markers and file-header lines removed.
    pub changed_content: String,
}

impl FileDiff {
    /// True when both views carry content; an empty view means there
    /// is nothing to review.
    pub fn is_reviewable(&self) -> bool {
        !self.full_content.is_empty() && !self.changed_content.is_empty()
    }
}

/// Fetches both views of `file` concurrently: the on-disk content and
/// the staged patch restricted to that one path.
///
/// Failures are scoped to this file; callers decide how to surface
/// them without affecting sibling fetches.
pub async fn fetch(repo_root: &Path, file: &str) -> Result<FileDiff> {
    let full_path = repo_root.join(file);

    let read_full = async {
        tokio::fs::read_to_string(&full_path)
            .await
            .with_context(|| format!("Failed to read file {}", full_path.display()))
    };

    let read_patch = async {
        // The path is a discrete argument after `--`, so file names with
        // spaces or shell metacharacters cannot break the invocation.
        let path_arg = full_path.to_string_lossy().into_owned();
        run_git(&["diff", "--cached", "--", &path_arg])
            .await
            .with_context(|| format!("Failed to get staged diff for {file}"))
    };

    let (full_content, raw_patch) = tokio::try_join!(read_full, read_patch)?;

    Ok(FileDiff {
        full_content,
        changed_content: extract_changed_lines(&raw_patch),
    })
}

/// Reduces a unified diff to its added/removed content lines.
///
/// Keeps only lines beginning with `+` or `-`, drops the `+++`/`---`
/// file-header lines, and strips the leading marker character. Applying
/// the transform to its own output is a no-op: stripped lines no longer
/// begin with a marker.
pub fn extract_changed_lines(patch: &str) -> String {
    patch
        .lines()
        .filter(|line| line.starts_with('+') || line.starts_with('-'))
        .filter(|line| !line.starts_with("+++") && !line.starts_with("---"))
        .map(strip_marker)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Removes one leading `+`/`-` marker from a diff line, if present.
fn strip_marker(line: &str) -> &str {
    line.strip_prefix('+')
        .or_else(|| line.strip_prefix('-'))
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── test helpers ────────────────────────────────────────────

    /// Builds a standard single-file staged diff.
    fn make_patch(path: &str, hunk_body: &str) -> String {
        format!(
            "diff --git a/{path} b/{path}\n\
             index abc1234..def5678 100644\n\
             --- a/{path}\n\
             +++ b/{path}\n\
             @@ -1,3 +1,4 @@\n\
             {hunk_body}"
        )
    }

    // ── extract_changed_lines ──────────────────────────────────

    #[test]
    fn extract_empty_patch() {
        assert_eq!(extract_changed_lines(""), "");
    }

    #[test]
    fn extract_keeps_added_and_removed() {
        let patch = make_patch("src/app.ts", " const a = 1;\n+const x = 1;\n-const y = 2;\n");
        let result = extract_changed_lines(&patch);
        assert_eq!(result, "const x = 1;\nconst y = 2;");
    }

    #[test]
    fn extract_drops_context_lines() {
        let patch = make_patch("src/app.ts", " unchanged\n+added\n unchanged\n");
        assert_eq!(extract_changed_lines(&patch), "added");
    }

    #[test]
    fn extract_drops_file_header_lines() {
        let patch = make_patch("src/app.ts", "+added\n");
        let result = extract_changed_lines(&patch);
        assert!(!result.contains("a/src/app.ts"));
        assert!(!result.contains("b/src/app.ts"));
    }

    #[test]
    fn extract_keeps_lines_that_start_with_double_marker() {
        // `++x` is an added line whose content begins with `+`; only the
        // three-character `+++`/`---` headers are dropped.
        let patch = make_patch("src/app.ts", "++x\n--y\n");
        assert_eq!(extract_changed_lines(&patch), "+x\n-y");
    }

    #[test]
    fn strip_marker_is_idempotent_on_stripped_lines() {
        assert_eq!(strip_marker("+const x = 1;"), "const x = 1;");
        assert_eq!(strip_marker("-const y = 2;"), "const y = 2;");
        // Already-stripped lines have no marker to strip.
        assert_eq!(strip_marker("const x = 1;"), "const x = 1;");

        let patch = make_patch(
            "src/app.ts",
            " const a = 1;\n+const x = 1;\n-const y = 2;\n+const z = 3;\n",
        );
        let once = extract_changed_lines(&patch);
        let restripped: String = once
            .lines()
            .map(strip_marker)
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(restripped, once);
    }

    #[test]
    fn extract_hunk_markers_dropped() {
        let patch = make_patch("src/app.ts", "+line\n");
        assert!(!extract_changed_lines(&patch).contains("@@"));
    }

    #[test]
    fn extract_binary_diff_yields_empty() {
        let patch = "diff --git a/logo.png b/logo.png\n\
                     new file mode 100644\n\
                     index 0000000..abc1234\n\
                     Binary files /dev/null and b/logo.png differ\n";
        assert_eq!(extract_changed_lines(patch), "");
    }

    // ── FileDiff ───────────────────────────────────────────────

    #[test]
    fn reviewable_requires_both_views() {
        let both = FileDiff {
            full_content: "const x = 1;".to_string(),
            changed_content: "const x = 1;".to_string(),
        };
        assert!(both.is_reviewable());

        let no_delta = FileDiff {
            full_content: "const x = 1;".to_string(),
            changed_content: String::new(),
        };
        assert!(!no_delta.is_reviewable());

        assert!(!FileDiff::default().is_reviewable());
    }
}
