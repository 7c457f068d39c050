use git2::Sort;

use crate::error::{AppError, Result};
use crate::git::repository::{commit_to_model, GitRepository};
use crate::models::Commit;

/// Default bound on commits returned by a history listing.
pub const DEFAULT_COMMIT_LIMIT: usize = 100;

impl GitRepository {
    /// Lists up to `limit` commits reachable from `branch` (or HEAD),
    /// newest first in topological order: a commit is never emitted before
    /// one of its descendants.
    pub fn list_commits(&self, branch: Option<&str>, limit: usize) -> Result<Vec<Commit>> {
        let mut commits = Vec::new();
        self.walk(branch, limit, |commit| {
            commits.push(commit_to_model(commit));
            Ok(true)
        })?;
        Ok(commits)
    }

    /// Bounded newest-first topological walk from `branch` or HEAD. The
    /// visitor returns `false` to stop early. Walks never fail on a bad
    /// branch name; only an unreadable or empty repository is an error.
    pub(crate) fn walk<F>(&self, branch: Option<&str>, max: usize, mut visit: F) -> Result<()>
    where
        F: FnMut(&git2::Commit<'_>) -> Result<bool>,
    {
        let start = self.resolve_start(branch)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(start.id())?;

        let mut seen = 0usize;
        for oid in revwalk {
            if seen >= max {
                break;
            }
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            seen += 1;
            if !visit(&commit)? {
                break;
            }
        }

        Ok(())
    }

    /// Resolves the starting commit of a walk. An unknown branch name falls
    /// back to HEAD so history browsing stays available.
    pub(crate) fn resolve_start(&self, branch: Option<&str>) -> Result<git2::Commit<'_>> {
        if let Some(name) = branch {
            match self.resolve_branch(name) {
                Ok(commit) => return Ok(commit),
                Err(AppError::BranchNotFound(_)) => {
                    tracing::debug!("branch {} not found, falling back to HEAD", name);
                }
                Err(e) => return Err(e),
            }
        }
        self.head_commit()
    }

    fn resolve_branch(&self, name: &str) -> Result<git2::Commit<'_>> {
        let branch = self
            .repo
            .find_branch(name, git2::BranchType::Local)
            .map_err(|_| AppError::BranchNotFound(name.to_string()))?;
        branch
            .into_reference()
            .peel_to_commit()
            .map_err(|_| AppError::BranchNotFound(name.to_string()))
    }
}
