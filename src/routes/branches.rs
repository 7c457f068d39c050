//! Branch and remote listing endpoints.
//!
//! - GET /api/v1/repository/branches
//!   Lists local branches with the current branch flagged.
//!
//! - GET /api/v1/repository/remotes
//!   Lists configured remotes; separate push URLs appear as extra entries
//!   sharing the remote's name.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::models::{Branch, Remote};
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/repository/branches", get(list_branches))
        .route("/api/v1/repository/remotes", get(list_remotes))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct RepoQuery {
    repo_path: Option<String>,
}

async fn list_branches(
    State(state): State<AppState>,
    Query(query): Query<RepoQuery>,
) -> Result<Json<Vec<Branch>>> {
    let repo = state.open_repo(query.repo_path.as_deref())?;
    Ok(Json(repo.list_branches()?))
}

async fn list_remotes(
    State(state): State<AppState>,
    Query(query): Query<RepoQuery>,
) -> Result<Json<Vec<Remote>>> {
    let repo = state.open_repo(query.repo_path.as_deref())?;
    Ok(Json(repo.list_remotes()?))
}
