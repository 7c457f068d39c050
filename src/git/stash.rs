//! Stash listing and stash diffs.
//!
//! A stash entry is a commit-like snapshot stored outside normal history,
//! addressed by stack index (0 = most recent). Its changes are read the same
//! way as a commit's: stash commit tree against its first parent.

use crate::error::{AppError, Result};
use crate::git::repository::{format_date, GitRepository};
use crate::models::{FileChange, FileDiff, StashEntry};

impl GitRepository {
    pub fn list_stashes(&mut self) -> Result<Vec<StashEntry>> {
        let mut raw: Vec<(usize, String, git2::Oid)> = Vec::new();
        self.repo.stash_foreach(|index, message, oid| {
            raw.push((index, message.to_string(), *oid));
            true
        })?;

        let mut entries = Vec::with_capacity(raw.len());
        for (index, message, oid) in raw {
            let commit = self.repo.find_commit(oid)?;
            let author = commit.author();
            let timestamp = commit.time().seconds();

            entries.push(StashEntry {
                index,
                commit_id: oid.to_string(),
                message,
                author: author.name().unwrap_or("Unknown").to_string(),
                timestamp,
                date: format_date(timestamp),
            });
        }

        Ok(entries)
    }

    pub fn get_stash_changes(&mut self, index: usize) -> Result<Vec<FileChange>> {
        let oid = self.stash_commit(index)?;
        let commit = self.repo.find_commit(oid)?;
        let new_tree = commit.tree()?;
        let old_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };
        self.tree_changes(old_tree.as_ref(), Some(&new_tree))
    }

    pub fn get_stash_file_diff(&mut self, index: usize, path: &str) -> Result<FileDiff> {
        let oid = self.stash_commit(index)?;
        self.get_file_diff(&oid.to_string(), path)
    }

    fn stash_commit(&mut self, index: usize) -> Result<git2::Oid> {
        let mut found = None;
        self.repo.stash_foreach(|i, _message, oid| {
            if i == index {
                found = Some(*oid);
                false
            } else {
                true
            }
        })?;
        found.ok_or(AppError::StashNotFound(index))
    }
}
