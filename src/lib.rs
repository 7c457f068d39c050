//! git-lens - history traversal and search/diff/blame engine for local git
//! repositories, served to a UI over a small HTTP API.
//!
//! The engine lives in [`git`]: bounded commit walks, whole-file line
//! diffs, per-line blame attribution, full-history search, and a bounded
//! blame cache. [`routes`] is the request/response boundary the surrounding
//! application talks to; [`models`] holds the serialized shapes.

pub mod error;
pub mod git;
pub mod models;
pub mod routes;
