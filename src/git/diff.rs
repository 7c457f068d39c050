//! Line-level diff engine.
//!
//! Computes whole-file line diffs between a commit's tree and its first
//! parent (or between HEAD and the index for staged changes), plus
//! changeset-level file listings with rename detection.
//!
//! The line diff is a longest-common-subsequence alignment: matched lines
//! become `context`, lines only on the old side `deletion`, lines only on
//! the new side `addition`. Every line of both files appears in the output,
//! so deletions+context reconstruct the old file and additions+context the
//! new one. The blame engine reuses the same alignment.

use git2::{Delta, DiffFindOptions, DiffOptions, Tree};
use std::path::Path;

use crate::error::{AppError, Result};
use crate::git::repository::{blob_at, GitRepository};
use crate::models::{DiffLine, FileChange, FileDiff, FileStatus, LineType};

/// Bytes inspected when sniffing for binary content.
const BINARY_SNIFF_LEN: usize = 8000;

/// Similarity required to pair a deleted path with an added one, percent.
const RENAME_THRESHOLD: u16 = 50;

impl GitRepository {
    /// Diff of one file introduced by `rev`, against its first parent.
    /// Root commits diff against the empty tree.
    pub fn get_file_diff(&self, rev: &str, path: &str) -> Result<FileDiff> {
        let commit = self.find_commit(rev)?;
        let new_tree = commit.tree()?;
        let old_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };

        let old_blob = old_tree.as_ref().and_then(|t| blob_at(&self.repo, t, path));
        let new_blob = blob_at(&self.repo, &new_tree, path);
        self.blob_pair_diff(old_blob, new_blob, path, rev)
    }

    /// Files touched by `rev` relative to its first parent, with renames
    /// collapsed into single entries above the similarity threshold.
    pub fn get_commit_changes(&self, rev: &str) -> Result<Vec<FileChange>> {
        let commit = self.find_commit(rev)?;
        let new_tree = commit.tree()?;
        let old_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };
        self.tree_changes(old_tree.as_ref(), Some(&new_tree))
    }

    /// Changes staged in the index relative to HEAD.
    pub fn list_staged_changes(&self) -> Result<Vec<FileChange>> {
        let head_tree = self.head_tree();
        let mut opts = DiffOptions::new();
        let mut diff =
            self.repo
                .diff_tree_to_index(head_tree.as_ref(), None, Some(&mut opts))?;

        let mut find = DiffFindOptions::new();
        find.renames(true).rename_threshold(RENAME_THRESHOLD);
        diff.find_similar(Some(&mut find))?;

        Ok(collect_changes(&diff))
    }

    /// Line diff of one staged file: HEAD blob vs index blob.
    pub fn get_staged_file_diff(&self, path: &str) -> Result<FileDiff> {
        let head_tree = self.head_tree();
        let old_blob = head_tree.as_ref().and_then(|t| blob_at(&self.repo, t, path));

        let index = self.repo.index()?;
        let new_blob = index
            .get_path(Path::new(path), 0)
            .and_then(|entry| self.repo.find_blob(entry.id).ok());

        self.blob_pair_diff(old_blob, new_blob, path, "index")
    }

    fn head_tree(&self) -> Option<Tree<'_>> {
        self.repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .and_then(|c| c.tree().ok())
    }

    pub(crate) fn tree_changes(
        &self,
        old_tree: Option<&Tree<'_>>,
        new_tree: Option<&Tree<'_>>,
    ) -> Result<Vec<FileChange>> {
        let mut opts = DiffOptions::new();
        let mut diff = self
            .repo
            .diff_tree_to_tree(old_tree, new_tree, Some(&mut opts))?;

        let mut find = DiffFindOptions::new();
        find.renames(true).rename_threshold(RENAME_THRESHOLD);
        diff.find_similar(Some(&mut find))?;

        Ok(collect_changes(&diff))
    }

    pub(crate) fn blob_pair_diff(
        &self,
        old_blob: Option<git2::Blob<'_>>,
        new_blob: Option<git2::Blob<'_>>,
        path: &str,
        rev: &str,
    ) -> Result<FileDiff> {
        let status = match (&old_blob, &new_blob) {
            (None, Some(_)) => FileStatus::Added,
            (Some(_), None) => FileStatus::Deleted,
            (Some(_), Some(_)) => FileStatus::Modified,
            (None, None) => {
                return Err(AppError::FileNotFound {
                    path: path.to_string(),
                    commit: rev.to_string(),
                });
            }
        };

        let old_data = old_blob.as_ref().map(|b| b.content()).unwrap_or(&[]);
        let new_data = new_blob.as_ref().map(|b| b.content()).unwrap_or(&[]);

        if is_binary(old_data) || is_binary(new_data) {
            return Ok(FileDiff {
                path: path.to_string(),
                status,
                is_binary: true,
                diff_lines: Vec::new(),
            });
        }

        let old_text = String::from_utf8_lossy(old_data);
        let new_text = String::from_utf8_lossy(new_data);
        let old_lines = split_lines(&old_text);
        let new_lines = split_lines(&new_text);

        Ok(FileDiff {
            path: path.to_string(),
            status,
            is_binary: false,
            diff_lines: diff_lines(&old_lines, &new_lines),
        })
    }
}

fn collect_changes(diff: &git2::Diff<'_>) -> Vec<FileChange> {
    let mut changes = Vec::new();

    for delta in diff.deltas() {
        let status = match delta.status() {
            Delta::Added | Delta::Copied => FileStatus::Added,
            Delta::Deleted => FileStatus::Deleted,
            Delta::Modified | Delta::Typechange => FileStatus::Modified,
            Delta::Renamed => FileStatus::Renamed,
            _ => continue,
        };

        let file = if status == FileStatus::Deleted {
            delta.old_file()
        } else {
            delta.new_file()
        };
        let path = file
            .path()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();

        let old_path = if status == FileStatus::Renamed {
            delta
                .old_file()
                .path()
                .map(|p| p.to_string_lossy().to_string())
        } else {
            None
        };

        changes.push(FileChange {
            path,
            status,
            old_path,
        });
    }

    changes
}

/// Binary sniff: a NUL byte or a UTF-16 byte-order mark in the first chunk.
pub(crate) fn is_binary(data: &[u8]) -> bool {
    let head = &data[..data.len().min(BINARY_SNIFF_LEN)];
    if head.starts_with(&[0xFF, 0xFE]) || head.starts_with(&[0xFE, 0xFF]) {
        return true;
    }
    head.contains(&0)
}

pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Longest common subsequence of lines as ordered (old_index, new_index)
/// pairs. Common prefix and suffix are peeled off before the quadratic
/// table is built over the differing middle.
pub(crate) fn line_matches(old: &[&str], new: &[&str]) -> Vec<(usize, usize)> {
    let mut matches = Vec::new();

    let mut start = 0;
    while start < old.len() && start < new.len() && old[start] == new[start] {
        matches.push((start, start));
        start += 1;
    }

    let mut old_end = old.len();
    let mut new_end = new.len();
    let mut suffix = Vec::new();
    while old_end > start && new_end > start && old[old_end - 1] == new[new_end - 1] {
        old_end -= 1;
        new_end -= 1;
        suffix.push((old_end, new_end));
    }

    let m = old_end - start;
    let n = new_end - start;
    if m > 0 && n > 0 {
        // table[i][j] = LCS length of old[start+i..old_end] vs new[start+j..new_end]
        let width = n + 1;
        let mut table = vec![0u32; (m + 1) * width];
        for i in (0..m).rev() {
            for j in (0..n).rev() {
                table[i * width + j] = if old[start + i] == new[start + j] {
                    table[(i + 1) * width + j + 1] + 1
                } else {
                    table[(i + 1) * width + j].max(table[i * width + j + 1])
                };
            }
        }

        let (mut i, mut j) = (0, 0);
        while i < m && j < n {
            if old[start + i] == new[start + j] {
                matches.push((start + i, start + j));
                i += 1;
                j += 1;
            } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
                i += 1;
            } else {
                j += 1;
            }
        }
    }

    suffix.reverse();
    matches.extend(suffix);
    matches
}

/// Emits the full aligned line stream. The old counter advances on context
/// and deletion lines, the new counter on context and addition lines.
/// Within a gap, deletions come before additions.
pub(crate) fn diff_lines(old: &[&str], new: &[&str]) -> Vec<DiffLine> {
    let matches = line_matches(old, new);
    let mut lines = Vec::new();

    let mut old_no: u32 = 1;
    let mut new_no: u32 = 1;
    let mut oi = 0usize;
    let mut ni = 0usize;

    for (match_old, match_new) in matches {
        while oi < match_old {
            lines.push(DiffLine {
                line_type: LineType::Deletion,
                old_line_number: Some(old_no),
                new_line_number: None,
                content: old[oi].to_string(),
            });
            old_no += 1;
            oi += 1;
        }
        while ni < match_new {
            lines.push(DiffLine {
                line_type: LineType::Addition,
                old_line_number: None,
                new_line_number: Some(new_no),
                content: new[ni].to_string(),
            });
            new_no += 1;
            ni += 1;
        }
        lines.push(DiffLine {
            line_type: LineType::Context,
            old_line_number: Some(old_no),
            new_line_number: Some(new_no),
            content: old[oi].to_string(),
        });
        old_no += 1;
        new_no += 1;
        oi += 1;
        ni += 1;
    }

    while oi < old.len() {
        lines.push(DiffLine {
            line_type: LineType::Deletion,
            old_line_number: Some(old_no),
            new_line_number: None,
            content: old[oi].to_string(),
        });
        old_no += 1;
        oi += 1;
    }
    while ni < new.len() {
        lines.push(DiffLine {
            line_type: LineType::Addition,
            old_line_number: None,
            new_line_number: Some(new_no),
            content: new[ni].to_string(),
        });
        new_no += 1;
        ni += 1;
    }

    lines
}
