//! Integration tests for full-history search.

mod common;

use common::TestRepo;
use git_lens::git::search::MAX_RESULTS;
use git_lens::git::GitRepository;
use git_lens::models::SearchResultType;

#[test]
fn finds_content_across_history_and_skips_merges() {
    let mut fixture = TestRepo::new();
    fixture.commit_file("a.txt", b"hello world\n", "add a");
    fixture.commit_file("b.py", b"def hello(): pass\n", "add b");
    let base = fixture.current_branch();
    fixture.checkout_new_branch("unrelated");
    let side_tip = fixture.commit_file("c.txt", b"nothing here\n", "side work");
    fixture.checkout(&base);
    let merge = fixture.merge_commit(side_tip, "merge unrelated branch");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let results = repo.search(None, "hello", 10).unwrap();

    assert_eq!(results.len(), 2);
    assert!(results
        .iter()
        .all(|r| r.result_type == SearchResultType::Content));
    assert!(results.iter().all(|r| r.commit_id != merge.to_string()));

    // Walk order: the newer b.py hit comes first
    assert_eq!(results[0].file_path.as_deref(), Some("b.py"));
    assert_eq!(results[0].line_number, Some(1));
    assert_eq!(
        results[0].content_preview.as_deref(),
        Some("def hello(): pass")
    );
    assert_eq!(results[1].file_path.as_deref(), Some("a.txt"));
    assert_eq!(results[1].line_number, Some(1));
}

#[test]
fn message_matches_produce_commit_results() {
    let mut fixture = TestRepo::new();
    fixture.commit_file("a.txt", b"plain\n", "introduce frobnicator");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let results = repo.search(None, "frobnic", 10).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].result_type, SearchResultType::Commit);
    assert_eq!(results[0].commit_message, "introduce frobnicator");
    assert!(results[0].file_path.is_none());
}

#[test]
fn matching_is_case_insensitive() {
    let mut fixture = TestRepo::new();
    fixture.commit_file("readme.md", b"The QUICK brown fox\n", "docs");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let results = repo.search(None, "quick", 10).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].result_type, SearchResultType::Content);
}

#[test]
fn name_matched_files_are_not_content_scanned_again() {
    let mut fixture = TestRepo::new();
    fixture.commit_file("widget.rs", b"struct widget;\n", "add");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let results = repo.search(None, "widget", 10).unwrap();

    // Path and content both match, but the file yields one result only
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].result_type, SearchResultType::File);
    assert_eq!(results[0].file_path.as_deref(), Some("widget.rs"));
}

#[test]
fn results_within_one_commit_order_commit_file_content() {
    let mut fixture = TestRepo::new();
    fixture.write_file("zeta.txt", b"unrelated\n");
    fixture.write_file("notes.txt", b"about zeta\n");
    fixture.stage(&["zeta.txt", "notes.txt"]);
    fixture.commit("zeta rollout");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let results = repo.search(None, "zeta", 10).unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].result_type, SearchResultType::Commit);
    assert_type(&results[1], SearchResultType::File, "zeta.txt");
    assert_eq!(results[2].result_type, SearchResultType::Content);
    assert_eq!(results[2].file_path.as_deref(), Some("notes.txt"));
}

fn assert_type(
    result: &git_lens::models::SearchResult,
    expected: SearchResultType,
    path: &str,
) {
    assert_eq!(result.result_type, expected);
    assert_eq!(result.file_path.as_deref(), Some(path));
}

#[test]
fn result_cap_is_enforced() {
    let mut fixture = TestRepo::new();
    for i in 0..60 {
        fixture.commit_file(
            "log.txt",
            format!("entry {}\n", i).as_bytes(),
            &format!("needle update {}", i),
        );
    }

    let repo = GitRepository::open(fixture.path()).unwrap();
    let results = repo.search(None, "needle", 1000).unwrap();

    assert_eq!(results.len(), MAX_RESULTS);
}

#[test]
fn commit_budget_bounds_the_walk() {
    let mut fixture = TestRepo::new();
    fixture.commit_file("first.txt", b"the target is here\n", "oldest");
    for i in 0..12 {
        fixture.commit_file("filler.txt", format!("{}\n", i).as_bytes(), "filler");
    }

    let repo = GitRepository::open(fixture.path()).unwrap();

    // Only the 10 newest commits are scanned, so the old match is missed
    let narrow = repo.search(None, "target", 10).unwrap();
    assert!(narrow.is_empty());

    let wide = repo.search(None, "target", 100).unwrap();
    assert_eq!(wide.len(), 1);
}

#[test]
fn deleted_files_still_match_by_name() {
    let mut fixture = TestRepo::new();
    fixture.commit_file("obsolete_module.rs", b"code\n", "add module");
    fixture.remove_file("obsolete_module.rs");
    fixture.commit("drop module");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let results = repo.search(None, "obsolete", 10).unwrap();

    // Name hit in both the adding and the deleting commit
    assert_eq!(results.len(), 2);
    assert!(results
        .iter()
        .all(|r| r.result_type == SearchResultType::File));
}

#[test]
fn search_results_reference_real_commits() {
    let mut fixture = TestRepo::new();
    let c1 = fixture.commit_file("a.txt", b"alpha beta\n", "seed");

    let repo = GitRepository::open(fixture.path()).unwrap();
    let results = repo.search(None, "beta", 10).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].commit_id, c1.to_string());
    assert_eq!(results[0].commit_short_id, c1.to_string()[..8]);
    assert_eq!(results[0].commit_author, "Alice Example");
}
