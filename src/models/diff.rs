//! Diff-related DTOs.
//!
//! - `FileChange`: one file touched by a changeset, with status
//! - `FileDiff`: a single file's whole-file line diff
//! - `DiffLine`: single line (addition, deletion, or context)
//!
//! Line number invariant: `old_line_number` is set for context/deletion
//! lines, `new_line_number` for context/addition lines; pure additions and
//! deletions leave exactly one of the two unset.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
    pub path: String,
    pub status: FileStatus,
    /// Previous path, populated for renames only
    pub old_path: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDiff {
    pub path: String,
    pub status: FileStatus,
    pub is_binary: bool,
    /// Empty when `is_binary`
    pub diff_lines: Vec<DiffLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffLine {
    pub line_type: LineType,
    pub old_line_number: Option<u32>,
    pub new_line_number: Option<u32>,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    Context,
    Addition,
    Deletion,
}
