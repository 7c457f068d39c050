use chrono::DateTime;
use git2::{BranchType, Repository};
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{Author, Branch, Commit, Remote, RepositoryInfo};

/// Read-only handle on one repository, opened per request. Concurrent
/// requests each open their own handle, so no shared cursor exists.
pub struct GitRepository {
    pub repo: Repository,
    pub path: String,
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("path", &self.path)
            .finish()
    }
}

impl GitRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let repo =
            Repository::discover(&path).map_err(|_| AppError::RepoNotFound(path_str.clone()))?;

        Ok(Self {
            repo,
            path: path_str,
        })
    }

    pub fn info(&self) -> Result<RepositoryInfo> {
        let name = Path::new(&self.path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let head_branch = self.repo.head().ok().and_then(|h| {
            if h.is_branch() {
                h.shorthand().map(|s| s.to_string())
            } else {
                None
            }
        });

        let head_commit = self
            .repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok().map(|c| commit_to_model(&c)));

        Ok(RepositoryInfo {
            name,
            path: self.path.clone(),
            head_branch,
            head_commit,
            is_bare: self.repo.is_bare(),
            is_empty: self.repo.is_empty().unwrap_or(true),
        })
    }

    pub fn list_branches(&self) -> Result<Vec<Branch>> {
        let mut branches = Vec::new();

        for branch_result in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch_result?;
            if let Some(name) = branch.name()? {
                branches.push(Branch {
                    name: name.to_string(),
                    is_current: branch.is_head(),
                });
            }
        }

        Ok(branches)
    }

    /// Lists configured remotes. A remote with a distinct push URL yields a
    /// second entry with `is_push` set; both share the remote's name.
    pub fn list_remotes(&self) -> Result<Vec<Remote>> {
        let mut remotes = Vec::new();

        for name in self.repo.remotes()?.iter().flatten() {
            let remote = self.repo.find_remote(name)?;
            remotes.push(Remote {
                name: name.to_string(),
                url: remote.url().unwrap_or("").to_string(),
                is_push: false,
            });
            if let Some(push_url) = remote.pushurl() {
                remotes.push(Remote {
                    name: name.to_string(),
                    url: push_url.to_string(),
                    is_push: true,
                });
            }
        }

        Ok(remotes)
    }

    /// Resolves any revspec (full or abbreviated id, ref name) to a commit.
    pub(crate) fn find_commit(&self, rev: &str) -> Result<git2::Commit<'_>> {
        let obj = self
            .repo
            .revparse_single(rev)
            .map_err(|_| AppError::CommitNotFound(rev.to_string()))?;
        obj.peel(git2::ObjectType::Commit)
            .map_err(|_| AppError::CommitNotFound(rev.to_string()))?
            .into_commit()
            .map_err(|_| AppError::CommitNotFound(rev.to_string()))
    }

    pub(crate) fn head_commit(&self) -> Result<git2::Commit<'_>> {
        let head = self
            .repo
            .head()
            .map_err(|_| AppError::EmptyRepository(self.path.clone()))?;
        head.peel_to_commit()
            .map_err(|_| AppError::EmptyRepository(self.path.clone()))
    }
}

/// Looks up a blob by path inside a tree. Returns `None` for missing paths
/// and for entries that are not blobs (directories, submodules).
pub(crate) fn blob_at<'r>(
    repo: &'r Repository,
    tree: &git2::Tree<'_>,
    path: &str,
) -> Option<git2::Blob<'r>> {
    let entry = tree.get_path(Path::new(path)).ok()?;
    let obj = entry.to_object(repo).ok()?;
    obj.into_blob().ok()
}

pub fn commit_to_model(commit: &git2::Commit<'_>) -> Commit {
    let id = commit.id().to_string();
    let short_id = id.chars().take(8).collect();
    let author = commit.author();
    let timestamp = commit.time().seconds();

    Commit {
        id,
        short_id,
        message: commit.message().unwrap_or("").trim().to_string(),
        author: Author {
            name: author.name().unwrap_or("Unknown").to_string(),
            email: author.email().unwrap_or("").to_string(),
        },
        timestamp,
        date: format_date(timestamp),
        relative_time: format_relative_time(timestamp),
        parent_ids: commit.parent_ids().map(|id| id.to_string()).collect(),
    }
}

pub fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|d| d.to_rfc3339())
        .unwrap_or_default()
}

pub fn format_relative_time(timestamp: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let diff = now - timestamp;

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        let mins = diff / 60;
        format!("{} minute{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff < 86400 {
        let hours = diff / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff < 2592000 {
        let days = diff / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else if diff < 31536000 {
        let months = diff / 2592000;
        format!("{} month{} ago", months, if months == 1 { "" } else { "s" })
    } else {
        let years = diff / 31536000;
        format!("{} year{} ago", years, if years == 1 { "" } else { "s" })
    }
}
