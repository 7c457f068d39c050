//! API route handlers - maps HTTP endpoints to engine operations.
//!
//! Each submodule defines routes for a feature area:
//! - `repository`: Repo metadata (GET /api/v1/repository)
//! - `branches`: Branch and remote listing
//! - `commits`: Bounded history walks and per-commit changesets
//! - `diff`: Line-level file diffs
//! - `blame`: Per-line commit attribution, cached
//! - `tree`: Commit tree snapshots and file content
//! - `search`: Full-history search with generation tokens
//! - `staged`: Index-vs-HEAD changes
//! - `stash`: Stash listing and stash diffs
//!
//! Every request may carry a `repo_path` query parameter; when absent, the
//! repository given on the command line is used. Handlers open a fresh
//! repository handle per request - the only shared state is the blame cache
//! and the search generation counter.

pub mod blame;
pub mod branches;
pub mod commits;
pub mod diff;
pub mod repository;
pub mod search;
pub mod staged;
pub mod stash;
pub mod tree;

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use axum::Router;

use crate::error::Result;
use crate::git::{BlameCache, GitRepository};

#[derive(Clone)]
pub struct AppState {
    pub default_repo: String,
    pub blame_cache: Arc<BlameCache>,
    pub search_generation: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(default_repo: String) -> Self {
        Self {
            default_repo,
            blame_cache: Arc::new(BlameCache::default()),
            search_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub(crate) fn open_repo(&self, repo_path: Option<&str>) -> Result<GitRepository> {
        GitRepository::open(repo_path.unwrap_or(&self.default_repo))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(repository::routes(state.clone()))
        .merge(branches::routes(state.clone()))
        .merge(commits::routes(state.clone()))
        .merge(diff::routes(state.clone()))
        .merge(blame::routes(state.clone()))
        .merge(tree::routes(state.clone()))
        .merge(search::routes(state.clone()))
        .merge(staged::routes(state.clone()))
        .merge(stash::routes(state))
}
