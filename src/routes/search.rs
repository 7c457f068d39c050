//! Full-history search endpoint.
//!
//! GET /api/v1/repository/search?q=<query>&branch=<optional>&max_commits=<optional>
//!
//! Two boundary rules live here rather than in the engine:
//! - Queries shorter than two characters return an empty result set without
//!   touching the walker.
//! - Every request is stamped with a generation from a monotonically
//!   increasing counter. A response computed under a superseded generation
//!   is returned with `stale: true` and no results, so "last response wins"
//!   holds even when an older, slower search finishes after a newer one.

use std::sync::atomic::Ordering;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::error::Result;
use crate::git::search::DEFAULT_MAX_COMMITS;
use crate::models::SearchResponse;
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/repository/search", get(global_search))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    repo_path: Option<String>,
    q: String,
    branch: Option<String>,
    #[serde(default = "default_max_commits")]
    max_commits: usize,
}

fn default_max_commits() -> usize {
    DEFAULT_MAX_COMMITS
}

async fn global_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    let generation = state.search_generation.fetch_add(1, Ordering::SeqCst) + 1;

    if query.q.chars().count() < 2 {
        return Ok(Json(SearchResponse {
            generation,
            stale: false,
            results: Vec::new(),
        }));
    }

    let repo = state.open_repo(query.repo_path.as_deref())?;
    let results = repo.search(query.branch.as_deref(), &query.q, query.max_commits)?;

    let stale = state.search_generation.load(Ordering::SeqCst) != generation;
    Ok(Json(SearchResponse {
        generation,
        stale,
        results: if stale { Vec::new() } else { results },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(q: &str) -> Query<SearchQuery> {
        Query(SearchQuery {
            repo_path: None,
            q: q.to_string(),
            branch: None,
            max_commits: DEFAULT_MAX_COMMITS,
        })
    }

    #[tokio::test]
    async fn short_query_returns_empty_without_opening_the_repo() {
        // The default repo path is not a repository; a one-char query must
        // still succeed because the engine is never invoked for it
        let state = AppState::new("/nowhere/not-a-repo".to_string());

        let response = global_search(State(state), query("h")).await.unwrap();

        assert!(!response.0.stale);
        assert!(response.0.results.is_empty());
    }

    #[tokio::test]
    async fn each_request_gets_a_fresh_generation() {
        let state = AppState::new("/nowhere/not-a-repo".to_string());

        let first = global_search(State(state.clone()), query("a")).await.unwrap();
        let second = global_search(State(state), query("b")).await.unwrap();

        assert!(second.0.generation > first.0.generation);
    }
}
