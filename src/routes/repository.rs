use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::models::RepositoryInfo;
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/repository", get(get_repository_info))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct InfoQuery {
    repo_path: Option<String>,
}

async fn get_repository_info(
    State(state): State<AppState>,
    Query(query): Query<InfoQuery>,
) -> Result<Json<RepositoryInfo>> {
    let repo = state.open_repo(query.repo_path.as_deref())?;
    Ok(Json(repo.info()?))
}
