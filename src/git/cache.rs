//! Blame result cache.
//!
//! Blame is the single most expensive operation in the system, so computed
//! `FileBlame` values are memoized keyed by (repository path, commit id,
//! file path). The cache is bounded and evicts in insertion order once
//! capacity is exceeded; a read hit does not refresh an entry. That loses a
//! little hit rate versus LRU but keeps bookkeeping O(1).
//!
//! Process-local only: nothing persists, and nothing is invalidated when a
//! repository mutates underneath us. Commit-keyed entries stay correct
//! regardless; a rewritten stash or index does not touch this cache.
//!
//! One instance is owned by the server state and passed by handle, so tests
//! construct their own.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::models::FileBlame;

pub const DEFAULT_CAPACITY: usize = 50;

type Key = (String, String, String);

pub struct BlameCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<Key, Arc<FileBlame>>,
    order: VecDeque<Key>,
}

impl BlameCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(CacheInner::default()),
        }
    }

    pub fn get(&self, repo_path: &str, commit_id: &str, file_path: &str) -> Option<Arc<FileBlame>> {
        let inner = self.lock();
        let key = (
            repo_path.to_string(),
            commit_id.to_string(),
            file_path.to_string(),
        );
        let hit = inner.entries.get(&key).cloned();
        tracing::debug!(
            "blame cache {} for {}:{}",
            if hit.is_some() { "hit" } else { "miss" },
            commit_id,
            file_path
        );
        hit
    }

    pub fn put(
        &self,
        repo_path: &str,
        commit_id: &str,
        file_path: &str,
        blame: FileBlame,
    ) -> Arc<FileBlame> {
        let mut inner = self.lock();
        let key = (
            repo_path.to_string(),
            commit_id.to_string(),
            file_path.to_string(),
        );
        let value = Arc::new(blame);

        if inner.entries.insert(key.clone(), value.clone()).is_none() {
            inner.order.push_back(key);
            if inner.order.len() > self.capacity {
                if let Some(oldest) = inner.order.pop_front() {
                    inner.entries.remove(&oldest);
                }
            }
        }

        value
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        // A poisoned lock only means another request panicked mid-insert;
        // the map itself is still usable.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for BlameCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
