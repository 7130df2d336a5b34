//! In-memory LRU cache for derived projections
//!
//! Projections are cheap folds, but the live UI polls them every couple of
//! seconds. Cache keys carry the last store-assigned event id, so any append
//! changes the key and a cached value is definitionally identical to a fresh
//! recomputation. Derived data is never persisted to disk; the log is the
//! only durable state.

use crate::cli::types::{GameId, PlayerId};
use crate::engine::{BoxScoreLine, ScorePoint};
use lru::LruCache;
use std::collections::BTreeMap;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex};

/// Cache key for whole-game projections: any append bumps `last_event_id`
/// and thereby misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectionKey {
    pub game_id: GameId,
    pub last_event_id: i64,
}

/// Small thread-safe LRU wrapper
pub struct MemoryCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    entries: Mutex<LruCache<K, V>>,
    capacity: usize,
}

impl<K, V> MemoryCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(NonZeroUsize::new(capacity).unwrap())),
            capacity,
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn put(&self, key: K, value: V) {
        self.entries.lock().unwrap().put(key, value);
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    /// (used, capacity)
    pub fn stats(&self) -> (usize, usize) {
        (self.entries.lock().unwrap().len(), self.capacity)
    }
}

/// Cache manager for the projections the UI polls hardest
pub struct CacheManager {
    pub box_scores: MemoryCache<ProjectionKey, BTreeMap<PlayerId, BoxScoreLine>>,
    pub progressions: MemoryCache<ProjectionKey, Vec<ScorePoint>>,
}

impl CacheManager {
    /// Create a new cache manager with reasonable defaults
    pub fn new() -> Self {
        Self {
            box_scores: MemoryCache::new(64),   // Cache up to 64 game box scores
            progressions: MemoryCache::new(64), // Cache up to 64 score progressions
        }
    }

    /// Clear all caches
    pub fn clear_all(&self) {
        self.box_scores.clear();
        self.progressions.clear();
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Global cache instance for use across the application
pub static GLOBAL_CACHE: LazyLock<CacheManager> = LazyLock::new(CacheManager::new);
