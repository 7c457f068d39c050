use serde::{Deserialize, Serialize};

/// One stash entry. Index 0 is the most recently stashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StashEntry {
    pub index: usize,
    pub commit_id: String,
    pub message: String,
    pub author: String,
    pub timestamp: i64,
    /// RFC 3339 author date
    pub date: String,
}
