//! Integration tests for commit tree snapshots and file content reads.

mod common;

use common::TestRepo;
use git_lens::error::AppError;
use git_lens::git::GitRepository;

#[test]
fn tree_snapshot_nests_directories_first() {
    let mut fixture = TestRepo::new();
    fixture.write_file("readme.md", b"# hi\n");
    fixture.write_file("src/main.rs", b"fn main() {}\n");
    fixture.write_file("src/lib.rs", b"pub fn lib() {}\n");
    fixture.stage(&["readme.md", "src/main.rs", "src/lib.rs"]);
    let c1 = fixture.commit("layout");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let roots = repo.get_commit_file_tree(&c1.to_string()).unwrap();

    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0].name, "src");
    assert!(roots[0].is_directory);
    assert!(roots[0].size.is_none());
    assert_eq!(roots[1].name, "readme.md");
    assert!(!roots[1].is_directory);
    assert_eq!(roots[1].file_type, "md");
    assert_eq!(roots[1].size, Some(5));

    let src = &roots[0];
    assert_eq!(src.children.len(), 2);
    assert_eq!(src.children[0].path, "src/lib.rs");
    assert_eq!(src.children[0].file_type, "rs");
    assert_eq!(src.children[1].path, "src/main.rs");
}

#[test]
fn tree_snapshot_is_per_commit() {
    let mut fixture = TestRepo::new();
    let c1 = fixture.commit_file("only.txt", b"one\n", "first");
    fixture.commit_file("later.txt", b"two\n", "second");

    let repo = GitRepository::open(fixture.path()).unwrap();

    let old_tree = repo.get_commit_file_tree(&c1.to_string()).unwrap();
    assert_eq!(old_tree.len(), 1);
    assert_eq!(old_tree[0].name, "only.txt");

    let new_tree = repo.get_commit_file_tree("HEAD").unwrap();
    assert_eq!(new_tree.len(), 2);
}

#[test]
fn file_content_is_read_at_the_requested_commit() {
    let mut fixture = TestRepo::new();
    let c1 = fixture.commit_file("doc.txt", b"old text\n", "v1");
    fixture.commit_file("doc.txt", b"new text\n", "v2");

    let repo = GitRepository::open(fixture.path()).unwrap();

    let old = repo.get_file_content(&c1.to_string(), "doc.txt").unwrap();
    assert_eq!(old.content, "old text\n");
    assert_eq!(old.commit_id, c1.to_string());

    let new = repo.get_file_content("HEAD", "doc.txt").unwrap();
    assert_eq!(new.content, "new text\n");
}

#[test]
fn missing_path_is_file_not_found() {
    let mut fixture = TestRepo::new();
    fixture.commit_file("a.txt", b"a\n", "base");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let err = repo.get_file_content("HEAD", "missing.txt").unwrap_err();

    assert!(matches!(err, AppError::FileNotFound { .. }));
}

#[test]
fn directory_path_is_invalid_for_content() {
    let mut fixture = TestRepo::new();
    fixture.write_file("src/main.rs", b"fn main() {}\n");
    fixture.stage(&["src/main.rs"]);
    fixture.commit("base");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let err = repo.get_file_content("HEAD", "src").unwrap_err();

    assert!(matches!(err, AppError::InvalidPath(_)));
}

#[test]
fn remotes_include_push_variants() {
    let mut fixture = TestRepo::new();
    fixture.commit_file("a.txt", b"a\n", "base");
    fixture
        .repo
        .remote("origin", "https://example.com/fetch.git")
        .unwrap();
    fixture
        .repo
        .remote_set_pushurl("origin", Some("https://example.com/push.git"))
        .unwrap();

    let repo = GitRepository::open(fixture.path()).unwrap();
    let remotes = repo.list_remotes().unwrap();

    assert_eq!(remotes.len(), 2);
    assert_eq!(remotes[0].name, "origin");
    assert_eq!(remotes[0].url, "https://example.com/fetch.git");
    assert!(!remotes[0].is_push);
    assert_eq!(remotes[1].url, "https://example.com/push.git");
    assert!(remotes[1].is_push);
}
