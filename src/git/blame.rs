//! Per-line commit attribution.
//!
//! For each line of a file at a commit, finds the commit that introduced the
//! line's current content by walking first-parent ancestry. At every step the
//! candidate commit's version of the file is aligned against its parent's
//! version with the diff engine's LCS matching; lines that still match carry
//! back to the parent, lines that stop matching are attributed to the
//! candidate. A root commit (or a parent where the file is absent or binary)
//! absorbs whatever is left.
//!
//! Cost is O(lines x history depth); this is the most expensive operation in
//! the system and the reason blame responses are cached (`cache.rs`).

use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::git::diff::{is_binary, line_matches, split_lines};
use crate::git::repository::{blob_at, format_date, GitRepository};
use crate::models::{BlameLine, FileBlame};

#[derive(Clone)]
struct Attribution {
    commit_id: String,
    commit_short_id: String,
    author: String,
    email: String,
    timestamp: i64,
}

impl Attribution {
    fn of(commit: &git2::Commit<'_>) -> Self {
        let commit_id = commit.id().to_string();
        let commit_short_id = commit_id.chars().take(8).collect();
        let author = commit.author();
        Self {
            commit_id,
            commit_short_id,
            author: author.name().unwrap_or("Unknown").to_string(),
            email: author.email().unwrap_or("").to_string(),
            timestamp: commit.time().seconds(),
        }
    }
}

impl GitRepository {
    /// Blames every line of `path` as it exists at `rev`. Fails with
    /// `FileNotFound` when the file is absent or binary at that commit.
    /// The result always has exactly one entry per line of the file.
    pub fn get_file_blame(&self, rev: &str, path: &str) -> Result<FileBlame> {
        let commit = self.find_commit(rev)?;
        let commit_id = commit.id().to_string();

        let tree = commit.tree()?;
        let blob = blob_at(&self.repo, &tree, path).ok_or_else(|| AppError::FileNotFound {
            path: path.to_string(),
            commit: rev.to_string(),
        })?;
        if is_binary(blob.content()) {
            return Err(AppError::FileNotFound {
                path: path.to_string(),
                commit: rev.to_string(),
            });
        }

        let text = String::from_utf8_lossy(blob.content()).to_string();
        let current_lines: Vec<String> = text.lines().map(str::to_string).collect();

        // positions[k]: where current line k sits in the candidate commit's
        // version of the file; None once the line has been attributed.
        let mut positions: Vec<Option<usize>> = (0..current_lines.len()).map(Some).collect();
        let mut attribution: Vec<Option<Attribution>> = vec![None; current_lines.len()];

        let mut candidate = commit;
        let mut candidate_text = text;

        while positions.iter().any(|p| p.is_some()) {
            let parent = if candidate.parent_count() > 0 {
                Some(candidate.parent(0)?)
            } else {
                None
            };

            let parent_text = parent.as_ref().and_then(|p| {
                let tree = p.tree().ok()?;
                let blob = blob_at(&self.repo, &tree, path)?;
                if is_binary(blob.content()) {
                    None
                } else {
                    Some(String::from_utf8_lossy(blob.content()).to_string())
                }
            });

            match (parent, parent_text) {
                (Some(parent), Some(parent_text)) => {
                    let candidate_lines = split_lines(&candidate_text);
                    let parent_lines = split_lines(&parent_text);

                    // candidate line index -> parent line index, for lines
                    // unchanged between parent and candidate
                    let carried: HashMap<usize, usize> =
                        line_matches(&parent_lines, &candidate_lines)
                            .into_iter()
                            .map(|(parent_pos, candidate_pos)| (candidate_pos, parent_pos))
                            .collect();

                    let attr = Attribution::of(&candidate);
                    for slot in 0..positions.len() {
                        if let Some(pos) = positions[slot] {
                            match carried.get(&pos) {
                                Some(&parent_pos) => positions[slot] = Some(parent_pos),
                                None => {
                                    attribution[slot] = Some(attr.clone());
                                    positions[slot] = None;
                                }
                            }
                        }
                    }

                    candidate = parent;
                    candidate_text = parent_text;
                }
                _ => {
                    // Root commit, or the file does not exist as text in the
                    // parent: every remaining line originated here.
                    let attr = Attribution::of(&candidate);
                    for slot in 0..positions.len() {
                        if positions[slot].take().is_some() {
                            attribution[slot] = Some(attr.clone());
                        }
                    }
                }
            }
        }

        let mut blame_lines = Vec::with_capacity(current_lines.len());
        for (idx, content) in current_lines.into_iter().enumerate() {
            let attr = attribution[idx]
                .take()
                .ok_or_else(|| AppError::Internal(format!("unattributed line {}", idx + 1)))?;
            blame_lines.push(BlameLine {
                commit_id: attr.commit_id,
                commit_short_id: attr.commit_short_id,
                author: attr.author,
                email: attr.email,
                timestamp: attr.timestamp,
                date: format_date(attr.timestamp),
                line_number: (idx + 1) as u32,
                content,
            });
        }

        Ok(FileBlame {
            path: path.to_string(),
            commit_id,
            blame_lines,
        })
    }
}
