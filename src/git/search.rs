//! Full-history search across commit messages, file names, and file content.
//!
//! Walks commits newest-first (merges skipped) under two budgets: a cap on
//! commits scanned and a cap on results returned. Once the result cap is
//! hit the walk stops, so older matches can be missing entirely. That is a
//! documented completeness trade-off in exchange for bounded latency.

use crate::error::Result;
use crate::git::repository::{blob_at, format_date, GitRepository};
use crate::models::{FileStatus, SearchResult, SearchResultType};

/// Hard cap on results per search.
pub const MAX_RESULTS: usize = 50;

/// Commits scanned when the caller does not say otherwise.
pub const DEFAULT_MAX_COMMITS: usize = 100;

/// Caller-supplied commit budgets are clamped to this range.
pub const MIN_MAX_COMMITS: usize = 10;
pub const MAX_MAX_COMMITS: usize = 10_000;

/// Blobs larger than this are not content-searched.
const CONTENT_SIZE_LIMIT: u64 = 512 * 1024;

/// Content previews are trimmed to this many characters.
const PREVIEW_LIMIT: usize = 200;

impl GitRepository {
    /// Searches up to `max_commits` commits reachable from `branch` (or
    /// HEAD) for `query`, case-insensitively. Emits at most [`MAX_RESULTS`]
    /// results in walk order; within one commit, message hits come before
    /// file-name hits, which come before content hits.
    ///
    /// Queries shorter than two characters are the boundary's problem; the
    /// engine assumes a usable query.
    pub fn search(
        &self,
        branch: Option<&str>,
        query: &str,
        max_commits: usize,
    ) -> Result<Vec<SearchResult>> {
        let needle = query.to_lowercase();
        let budget = max_commits.clamp(MIN_MAX_COMMITS, MAX_MAX_COMMITS);

        let mut results: Vec<SearchResult> = Vec::new();
        let mut scanned = 0usize;

        self.walk(branch, budget, |commit| {
            scanned += 1;

            // Merge commits are integration events, not authored content;
            // their side-branch work is reachable via its own commits.
            if commit.parent_count() > 1 {
                return Ok(true);
            }

            if commit
                .message()
                .unwrap_or("")
                .to_lowercase()
                .contains(&needle)
            {
                results.push(search_hit(commit, SearchResultType::Commit, None, None, None));
                if results.len() >= MAX_RESULTS {
                    return Ok(false);
                }
            }

            let changes = {
                let new_tree = commit.tree()?;
                let old_tree = if commit.parent_count() > 0 {
                    Some(commit.parent(0)?.tree()?)
                } else {
                    None
                };
                self.tree_changes(old_tree.as_ref(), Some(&new_tree))?
            };

            let mut unmatched_paths = Vec::new();
            for change in &changes {
                if change.path.to_lowercase().contains(&needle) {
                    results.push(search_hit(
                        commit,
                        SearchResultType::File,
                        Some(change.path.clone()),
                        None,
                        None,
                    ));
                    if results.len() >= MAX_RESULTS {
                        return Ok(false);
                    }
                } else if change.status != FileStatus::Deleted {
                    unmatched_paths.push(change.path.clone());
                }
            }

            let tree = commit.tree()?;
            for path in unmatched_paths {
                if let Some((line_number, preview)) =
                    self.first_content_match(&tree, &path, &needle)
                {
                    results.push(search_hit(
                        commit,
                        SearchResultType::Content,
                        Some(path),
                        Some(line_number),
                        Some(preview),
                    ));
                    if results.len() >= MAX_RESULTS {
                        return Ok(false);
                    }
                }
            }

            Ok(true)
        })?;

        tracing::debug!(
            "search for {:?}: {} commits scanned, {} results",
            query,
            scanned,
            results.len()
        );

        Ok(results)
    }

    /// First line of the blob at `path` containing `needle`, with a trimmed
    /// preview. Oversized and binary blobs are skipped outright to bound
    /// scan cost.
    fn first_content_match(
        &self,
        tree: &git2::Tree<'_>,
        path: &str,
        needle: &str,
    ) -> Option<(u32, String)> {
        let blob = blob_at(&self.repo, tree, path)?;
        if blob.size() as u64 > CONTENT_SIZE_LIMIT {
            return None;
        }

        let data = blob.content();
        if crate::git::diff::is_binary(data) {
            return None;
        }

        let text = String::from_utf8_lossy(data);
        for (idx, line) in text.lines().enumerate() {
            if line.to_lowercase().contains(needle) {
                let preview: String = line.trim().chars().take(PREVIEW_LIMIT).collect();
                return Some(((idx + 1) as u32, preview));
            }
        }

        None
    }
}

fn search_hit(
    commit: &git2::Commit<'_>,
    result_type: SearchResultType,
    file_path: Option<String>,
    line_number: Option<u32>,
    content_preview: Option<String>,
) -> SearchResult {
    let commit_id = commit.id().to_string();
    let commit_short_id = commit_id.chars().take(8).collect();

    SearchResult {
        result_type,
        commit_id,
        commit_short_id,
        commit_message: commit.message().unwrap_or("").trim().to_string(),
        commit_author: commit.author().name().unwrap_or("Unknown").to_string(),
        commit_date: format_date(commit.time().seconds()),
        file_path,
        line_number,
        content_preview,
    }
}
