use git2::ObjectType;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::git::repository::GitRepository;
use crate::models::{FileContent, FileTreeNode};

impl GitRepository {
    /// Snapshot of the file tree at `rev`, as root-level nodes with nested
    /// children. Directories sort before files, both alphabetically.
    pub fn get_commit_file_tree(&self, rev: &str) -> Result<Vec<FileTreeNode>> {
        let commit = self.find_commit(rev)?;
        let tree = commit.tree()?;
        Ok(build_tree(&self.repo, &tree, ""))
    }

    /// Raw UTF-8 content of one file at `rev`.
    pub fn get_file_content(&self, rev: &str, path: &str) -> Result<FileContent> {
        let commit = self.find_commit(rev)?;
        let tree = commit.tree()?;

        let entry = tree
            .get_path(Path::new(path))
            .map_err(|_| AppError::FileNotFound {
                path: path.to_string(),
                commit: rev.to_string(),
            })?;

        let obj = entry.to_object(&self.repo)?;
        let blob = obj
            .as_blob()
            .ok_or_else(|| AppError::InvalidPath(format!("{} is not a file", path)))?;

        let content = String::from_utf8(blob.content().to_vec())
            .map_err(|_| AppError::InvalidPath(format!("{} is not valid UTF-8", path)))?;

        Ok(FileContent {
            path: path.to_string(),
            commit_id: commit.id().to_string(),
            content,
        })
    }
}

fn build_tree(repo: &git2::Repository, tree: &git2::Tree<'_>, base_path: &str) -> Vec<FileTreeNode> {
    let mut nodes = Vec::new();

    for entry in tree.iter() {
        let name = entry.name().unwrap_or("").to_string();
        let path = if base_path.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", base_path, name)
        };

        match entry.kind() {
            Some(ObjectType::Tree) => {
                let children = entry
                    .to_object(repo)
                    .ok()
                    .and_then(|obj| obj.as_tree().map(|t| build_tree(repo, t, &path)))
                    .unwrap_or_default();

                nodes.push(FileTreeNode {
                    path,
                    name,
                    is_directory: true,
                    file_type: String::new(),
                    size: None,
                    children,
                });
            }
            Some(ObjectType::Blob) => {
                let size = entry
                    .to_object(repo)
                    .ok()
                    .and_then(|obj| obj.as_blob().map(|b| b.size() as u64));

                let file_type = Path::new(&name)
                    .extension()
                    .map(|e| e.to_string_lossy().to_lowercase())
                    .unwrap_or_default();

                nodes.push(FileTreeNode {
                    path,
                    name,
                    is_directory: false,
                    file_type,
                    size,
                    children: Vec::new(),
                });
            }
            _ => continue,
        }
    }

    // Sort: directories first, then files, alphabetically
    nodes.sort_by(|a, b| match (a.is_directory, b.is_directory) {
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });

    nodes
}
