pub mod blame;
pub mod cache;
pub mod diff;
pub mod history;
pub mod repository;
pub mod search;
pub mod stash;
pub mod tree;

pub use cache::BlameCache;
pub use repository::GitRepository;
