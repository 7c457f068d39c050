//! Blame endpoint.
//!
//! GET /api/v1/repository/blame?commit=<rev>&path=<path>
//!
//! Returns per-line commit attribution for a file at a commit. Responses
//! are cached keyed by (repository path, resolved commit id, file path);
//! the commit parameter accepts any revspec, so it is resolved to a full id
//! before the cache is consulted.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::models::FileBlame;
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/repository/blame", get(get_file_blame))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct BlameQuery {
    repo_path: Option<String>,
    commit: String,
    path: String,
}

async fn get_file_blame(
    State(state): State<AppState>,
    Query(query): Query<BlameQuery>,
) -> Result<Json<FileBlame>> {
    let repo = state.open_repo(query.repo_path.as_deref())?;
    let commit_id = repo.find_commit(&query.commit)?.id().to_string();

    if let Some(cached) = state.blame_cache.get(&repo.path, &commit_id, &query.path) {
        return Ok(Json(FileBlame::clone(&cached)));
    }

    let blame = repo.get_file_blame(&commit_id, &query.path)?;
    let stored = state
        .blame_cache
        .put(&repo.path, &commit_id, &query.path, blame);
    Ok(Json(FileBlame::clone(&stored)))
}
