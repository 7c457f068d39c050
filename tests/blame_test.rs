//! Integration tests for per-line blame attribution.

mod common;

use common::TestRepo;
use git_lens::error::AppError;
use git_lens::git::GitRepository;

#[test]
fn untouched_file_attributes_every_line_to_root() {
    let mut fixture = TestRepo::new();
    let content: String = (1..=10).map(|i| format!("line {}\n", i)).collect();
    let root = fixture.commit_file("stable.txt", content.as_bytes(), "add stable");
    // Later history never touches stable.txt
    fixture.commit_file("other.txt", b"noise\n", "unrelated");
    fixture.commit_file("other.txt", b"more noise\n", "unrelated again");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let blame = repo.get_file_blame("HEAD", "stable.txt").unwrap();

    assert_eq!(blame.blame_lines.len(), 10);
    for line in &blame.blame_lines {
        assert_eq!(line.commit_id, root.to_string());
        assert_eq!(line.commit_short_id, root.to_string()[..8]);
    }
}

#[test]
fn modified_line_is_attributed_to_the_modifying_commit() {
    let mut fixture = TestRepo::new();
    let c1 = fixture.commit_file("code.py", b"alpha\nbeta\ngamma\n", "v1");
    let c2 = fixture.commit_file("code.py", b"alpha\nBETA\ngamma\n", "v2");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let blame = repo.get_file_blame(&c2.to_string(), "code.py").unwrap();

    assert_eq!(blame.blame_lines.len(), 3);
    assert_eq!(blame.blame_lines[0].commit_id, c1.to_string());
    assert_eq!(blame.blame_lines[1].commit_id, c2.to_string());
    assert_eq!(blame.blame_lines[2].commit_id, c1.to_string());
    assert_eq!(blame.blame_lines[1].content, "BETA");
}

#[test]
fn appended_lines_belong_to_the_appending_commit() {
    let mut fixture = TestRepo::new();
    let c1 = fixture.commit_file("notes.md", b"first\n", "start notes");
    let c2 = fixture.commit_file("notes.md", b"first\nsecond\nthird\n", "extend notes");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let blame = repo.get_file_blame("HEAD", "notes.md").unwrap();

    assert_eq!(blame.blame_lines[0].commit_id, c1.to_string());
    assert_eq!(blame.blame_lines[1].commit_id, c2.to_string());
    assert_eq!(blame.blame_lines[2].commit_id, c2.to_string());
}

#[test]
fn blame_length_always_matches_the_file() {
    let mut fixture = TestRepo::new();
    fixture.commit_file("grow.txt", b"a\n", "v1");
    fixture.commit_file("grow.txt", b"a\nb\nc\n", "v2");
    let c3 = fixture.commit_file("grow.txt", b"a\nc\nd\ne\n", "v3");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let blame = repo.get_file_blame(&c3.to_string(), "grow.txt").unwrap();

    assert_eq!(blame.blame_lines.len(), 4);
    for (idx, line) in blame.blame_lines.iter().enumerate() {
        assert_eq!(line.line_number, (idx + 1) as u32);
    }
}

#[test]
fn blame_respects_the_requested_commit() {
    let mut fixture = TestRepo::new();
    let c1 = fixture.commit_file("doc.txt", b"old\n", "v1");
    fixture.commit_file("doc.txt", b"new\n", "v2");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let blame = repo.get_file_blame(&c1.to_string(), "doc.txt").unwrap();

    assert_eq!(blame.commit_id, c1.to_string());
    assert_eq!(blame.blame_lines.len(), 1);
    assert_eq!(blame.blame_lines[0].content, "old");
    assert_eq!(blame.blame_lines[0].commit_id, c1.to_string());
}

#[test]
fn missing_file_fails_with_file_not_found() {
    let mut fixture = TestRepo::new();
    fixture.commit_file("a.txt", b"a\n", "add a");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let err = repo.get_file_blame("HEAD", "ghost.txt").unwrap_err();

    assert!(matches!(err, AppError::FileNotFound { .. }));
}

#[test]
fn binary_file_fails_with_file_not_found() {
    let mut fixture = TestRepo::new();
    fixture.commit_file("img.bin", b"\x00\xff\x00\xff", "add binary");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let err = repo.get_file_blame("HEAD", "img.bin").unwrap_err();

    assert!(matches!(err, AppError::FileNotFound { .. }));
}

#[test]
fn recreated_file_is_attributed_to_the_recreating_commit() {
    let mut fixture = TestRepo::new();
    fixture.commit_file("phoenix.txt", b"original\n", "add");
    fixture.remove_file("phoenix.txt");
    fixture.commit("delete");
    let c3 = fixture.commit_file("phoenix.txt", b"original\n", "restore");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let blame = repo.get_file_blame("HEAD", "phoenix.txt").unwrap();

    // The file is absent in c3's parent, so attribution stops at c3 even
    // though identical content existed earlier in history
    assert_eq!(blame.blame_lines.len(), 1);
    assert_eq!(blame.blame_lines[0].commit_id, c3.to_string());
}
