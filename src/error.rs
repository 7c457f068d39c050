//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` for every failure the engine can surface and implements
//! Axum's `IntoResponse` to convert errors into JSON error bodies.
//!
//! Error mappings:
//! - `RepoNotFound`, `EmptyRepository`, `CommitNotFound`, `BranchNotFound`,
//!   `FileNotFound`, `StashNotFound` → 404
//! - `InvalidPath` → 400
//! - `Git`, `Internal` → 500
//!
//! `BranchNotFound` is recoverable in practice: the history walker catches it
//! and falls back to HEAD, so it only reaches the wire if a caller bypasses
//! the walker. Binary file content is not an error at all; it is reported via
//! the `is_binary` flag on `FileDiff`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Repository has no commits: {0}")]
    EmptyRepository(String),

    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    #[error("File not found: {path} at {commit}")]
    FileNotFound { path: String, commit: String },

    #[error("Stash not found: index {0}")]
    StashNotFound(usize),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Git(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            AppError::RepoNotFound(_)
            | AppError::EmptyRepository(_)
            | AppError::CommitNotFound(_)
            | AppError::BranchNotFound(_)
            | AppError::FileNotFound { .. }
            | AppError::StashNotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
