use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::models::{FileContent, FileTreeNode};
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/repository/tree", get(get_commit_file_tree))
        .route("/api/v1/repository/file", get(get_file_content))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct TreeQuery {
    repo_path: Option<String>,
    commit: String,
}

async fn get_commit_file_tree(
    State(state): State<AppState>,
    Query(query): Query<TreeQuery>,
) -> Result<Json<Vec<FileTreeNode>>> {
    let repo = state.open_repo(query.repo_path.as_deref())?;
    Ok(Json(repo.get_commit_file_tree(&query.commit)?))
}

#[derive(Debug, Deserialize)]
struct FileQuery {
    repo_path: Option<String>,
    commit: String,
    path: String,
}

async fn get_file_content(
    State(state): State<AppState>,
    Query(query): Query<FileQuery>,
) -> Result<Json<FileContent>> {
    let repo = state.open_repo(query.repo_path.as_deref())?;
    Ok(Json(repo.get_file_content(&query.commit, &query.path)?))
}
