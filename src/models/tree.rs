//! Tree and repository-related DTOs.
//!
//! - `FileTreeNode`: recursive snapshot of one commit's tree
//! - `RepositoryInfo`: repo metadata returned by the open handshake
//! - `FileContent`: raw text of one file at one commit

use serde::{Deserialize, Serialize};

use super::Commit;

/// A node in a commit's file tree. Never mutated after construction;
/// `children` is populated for directories only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTreeNode {
    pub path: String,
    pub name: String,
    pub is_directory: bool,
    /// Lower-cased file extension, empty for directories and bare names
    pub file_type: String,
    pub size: Option<u64>,
    pub children: Vec<FileTreeNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub path: String,
    pub head_branch: Option<String>,
    pub head_commit: Option<Commit>,
    pub is_bare: bool,
    pub is_empty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContent {
    pub path: String,
    pub commit_id: String,
    pub content: String,
}
