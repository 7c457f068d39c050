//! Data transfer objects (DTOs) for API responses.
//!
//! These structs are serialized to JSON for frontend consumption.
//! - `commit`: Commit, Author, Branch, Remote
//! - `diff`: FileChange, FileDiff, DiffLine for line-level diffs
//! - `blame`: FileBlame, BlameLine for per-line commit attribution
//! - `search`: SearchResult, SearchResponse for full-history search
//! - `tree`: FileTreeNode, RepositoryInfo for commit tree snapshots
//! - `stash`: StashEntry

pub mod blame;
pub mod commit;
pub mod diff;
pub mod search;
pub mod stash;
pub mod tree;

pub use blame::*;
pub use commit::*;
pub use diff::*;
pub use search::*;
pub use stash::*;
pub use tree::*;
