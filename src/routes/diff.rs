use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::models::FileDiff;
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/repository/diff", get(get_file_diff))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct DiffQuery {
    repo_path: Option<String>,
    commit: String,
    path: String,
}

async fn get_file_diff(
    State(state): State<AppState>,
    Query(query): Query<DiffQuery>,
) -> Result<Json<FileDiff>> {
    let repo = state.open_repo(query.repo_path.as_deref())?;
    Ok(Json(repo.get_file_diff(&query.commit, &query.path)?))
}
