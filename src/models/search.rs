//! Search result DTOs.
//!
//! One `SearchResult` per hit, in commit-walk order (newest first). Within a
//! single commit, `commit` results come before `file` results, which come
//! before `content` results. `file_path`, `line_number` and
//! `content_preview` are populated only for the result types that carry
//! them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub result_type: SearchResultType,
    pub commit_id: String,
    pub commit_short_id: String,
    pub commit_message: String,
    pub commit_author: String,
    pub commit_date: String,
    /// Matched file, for `file` and `content` results
    pub file_path: Option<String>,
    /// 1-based line of the first content match
    pub line_number: Option<u32>,
    /// Trimmed matched line, for `content` results
    pub content_preview: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchResultType {
    Commit,
    File,
    Content,
}

/// Search response with the request's generation token. The boundary keeps
/// only the latest generation; a `stale` response carries no results and
/// should be dropped by the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub generation: u64,
    pub stale: bool,
    pub results: Vec<SearchResult>,
}
