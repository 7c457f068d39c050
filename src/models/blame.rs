//! Blame data transfer objects.
//!
//! Per-line attribution of the commit that introduced each line's current
//! content, for a file at a specific commit. Computing this walks the whole
//! first-parent history of the file, so responses are cached (see
//! `git::cache`).

use serde::{Deserialize, Serialize};

/// Blame for every line of one file at one commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileBlame {
    /// Path of the file
    pub path: String,
    /// Commit the file was read at
    pub commit_id: String,
    /// One entry per line of the file, in file order
    pub blame_lines: Vec<BlameLine>,
}

/// Attribution for a single line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlameLine {
    /// Commit that introduced this line's content
    pub commit_id: String,
    pub commit_short_id: String,
    pub author: String,
    pub email: String,
    pub timestamp: i64,
    /// RFC 3339 author date
    pub date: String,
    /// 1-based, in current-file coordinates
    pub line_number: u32,
    pub content: String,
}
