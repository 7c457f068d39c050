//! Staged-changes endpoints.
//!
//! - GET /api/v1/repository/staged
//!   Lists files staged in the index relative to HEAD.
//!
//! - GET /api/v1/repository/staged-diff?path=<path>
//!   Line diff of one staged file: HEAD blob vs index blob.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::models::{FileChange, FileDiff};
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/repository/staged", get(list_staged_changes))
        .route("/api/v1/repository/staged-diff", get(get_staged_file_diff))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct StagedQuery {
    repo_path: Option<String>,
}

async fn list_staged_changes(
    State(state): State<AppState>,
    Query(query): Query<StagedQuery>,
) -> Result<Json<Vec<FileChange>>> {
    let repo = state.open_repo(query.repo_path.as_deref())?;
    Ok(Json(repo.list_staged_changes()?))
}

#[derive(Debug, Deserialize)]
struct StagedDiffQuery {
    repo_path: Option<String>,
    path: String,
}

async fn get_staged_file_diff(
    State(state): State<AppState>,
    Query(query): Query<StagedDiffQuery>,
) -> Result<Json<FileDiff>> {
    let repo = state.open_repo(query.repo_path.as_deref())?;
    Ok(Json(repo.get_staged_file_diff(&query.path)?))
}
