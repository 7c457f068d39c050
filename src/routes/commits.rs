use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::git::history::DEFAULT_COMMIT_LIMIT;
use crate::models::{Commit, FileChange};
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/repository/commits", get(list_commits))
        .route("/api/v1/repository/commit-changes", get(get_commit_changes))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CommitsQuery {
    repo_path: Option<String>,
    branch: Option<String>,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_COMMIT_LIMIT
}

async fn list_commits(
    State(state): State<AppState>,
    Query(query): Query<CommitsQuery>,
) -> Result<Json<Vec<Commit>>> {
    let repo = state.open_repo(query.repo_path.as_deref())?;
    Ok(Json(repo.list_commits(query.branch.as_deref(), query.limit)?))
}

#[derive(Debug, Deserialize)]
struct ChangesQuery {
    repo_path: Option<String>,
    commit: String,
}

async fn get_commit_changes(
    State(state): State<AppState>,
    Query(query): Query<ChangesQuery>,
) -> Result<Json<Vec<FileChange>>> {
    let repo = state.open_repo(query.repo_path.as_deref())?;
    Ok(Json(repo.get_commit_changes(&query.commit)?))
}
