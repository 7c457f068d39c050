//! Shared fixture builder for integration tests.
//!
//! Builds throwaway repositories programmatically with deterministic
//! signatures so walks, diffs and blame attribution are stable across runs.

// Each test binary uses a different subset of the helpers
#![allow(dead_code)]

use git2::{Repository, Signature, Time};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    clock: i64,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        Self {
            dir,
            repo,
            clock: 1_600_000_000,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn current_branch(&self) -> String {
        self.repo.head().unwrap().shorthand().unwrap().to_string()
    }

    fn signature(&mut self) -> Signature<'static> {
        // Strictly increasing author dates keep TIME sorting unambiguous
        self.clock += 60;
        Signature::new(
            "Alice Example",
            "alice@example.com",
            &Time::new(self.clock, 0),
        )
        .unwrap()
    }

    pub fn write_file(&self, rel: &str, contents: &[u8]) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    pub fn stage(&self, paths: &[&str]) {
        let mut index = self.repo.index().unwrap();
        for p in paths {
            index.add_path(Path::new(p)).unwrap();
        }
        index.write().unwrap();
    }

    pub fn remove_file(&self, rel: &str) {
        fs::remove_file(self.dir.path().join(rel)).unwrap();
        let mut index = self.repo.index().unwrap();
        index.remove_path(Path::new(rel)).unwrap();
        index.write().unwrap();
    }

    pub fn commit(&mut self, message: &str) -> git2::Oid {
        let sig = self.signature();
        let mut index = self.repo.index().unwrap();
        let tree_oid = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_oid).unwrap();

        let parents = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    pub fn commit_file(&mut self, rel: &str, contents: &[u8], message: &str) -> git2::Oid {
        self.write_file(rel, contents);
        self.stage(&[rel]);
        self.commit(message)
    }

    /// Creates a branch at HEAD and checks it out.
    pub fn checkout_new_branch(&mut self, name: &str) {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        self.repo.branch(name, &head, false).unwrap();
        drop(head);
        self.checkout(name);
    }

    pub fn checkout(&mut self, name: &str) {
        self.repo.set_head(&format!("refs/heads/{}", name)).unwrap();
        let mut opts = git2::build::CheckoutBuilder::new();
        opts.force();
        self.repo.checkout_head(Some(&mut opts)).unwrap();
    }

    /// Merge commit with HEAD as first parent and `other` as second,
    /// keeping HEAD's tree (content conflicts are irrelevant to these
    /// tests).
    pub fn merge_commit(&mut self, other: git2::Oid, message: &str) -> git2::Oid {
        let sig = self.signature();
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        let other = self.repo.find_commit(other).unwrap();
        let tree = head.tree().unwrap();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&head, &other])
            .unwrap()
    }

    pub fn stash(&mut self, message: &str) -> git2::Oid {
        let sig = self.signature();
        self.repo.stash_save(&sig, message, None).unwrap()
    }
}
