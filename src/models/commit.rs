use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    /// Full 40-hex object id
    pub id: String,
    /// First 8 hex chars of the id
    pub short_id: String,
    pub message: String,
    pub author: Author,
    pub timestamp: i64,
    /// RFC 3339 author date
    pub date: String,
    pub relative_time: String,
    /// Parent ids in order; more than one marks a merge commit
    pub parent_ids: Vec<String>,
}

impl Commit {
    pub fn is_merge(&self) -> bool {
        self.parent_ids.len() > 1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub is_current: bool,
}

/// A configured remote. Remotes with separate push and fetch URLs produce two
/// entries sharing the same name; grouping them is a display concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Remote {
    pub name: String,
    pub url: String,
    pub is_push: bool,
}
