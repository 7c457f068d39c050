//! Stash endpoints.
//!
//! - GET /api/v1/repository/stashes
//!   Lists stash entries, index 0 first.
//!
//! - GET /api/v1/repository/stash-changes?index=<n>
//!   Files touched by one stash, relative to its parent commit.
//!
//! - GET /api/v1/repository/stash-diff?index=<n>&path=<path>
//!   Line diff of one file within a stash.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::models::{FileChange, FileDiff, StashEntry};
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/repository/stashes", get(list_stashes))
        .route("/api/v1/repository/stash-changes", get(get_stash_changes))
        .route("/api/v1/repository/stash-diff", get(get_stash_file_diff))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct StashesQuery {
    repo_path: Option<String>,
}

async fn list_stashes(
    State(state): State<AppState>,
    Query(query): Query<StashesQuery>,
) -> Result<Json<Vec<StashEntry>>> {
    let mut repo = state.open_repo(query.repo_path.as_deref())?;
    Ok(Json(repo.list_stashes()?))
}

#[derive(Debug, Deserialize)]
struct StashChangesQuery {
    repo_path: Option<String>,
    index: usize,
}

async fn get_stash_changes(
    State(state): State<AppState>,
    Query(query): Query<StashChangesQuery>,
) -> Result<Json<Vec<FileChange>>> {
    let mut repo = state.open_repo(query.repo_path.as_deref())?;
    Ok(Json(repo.get_stash_changes(query.index)?))
}

#[derive(Debug, Deserialize)]
struct StashDiffQuery {
    repo_path: Option<String>,
    index: usize,
    path: String,
}

async fn get_stash_file_diff(
    State(state): State<AppState>,
    Query(query): Query<StashDiffQuery>,
) -> Result<Json<FileDiff>> {
    let mut repo = state.open_repo(query.repo_path.as_deref())?;
    Ok(Json(repo.get_stash_file_diff(query.index, &query.path)?))
}
