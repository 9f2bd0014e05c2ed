use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use crate::token::{generate_token, is_well_formed};

/// Entries kept when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Bidirectional path/token cache with least-recently-used eviction.
///
/// Both lookups count as an access. The recency-ordered path map and the
/// token index sit behind one lock so they never disagree.
pub struct OpaqueIdMapper {
    inner: Mutex<MapperInner>,
}

struct MapperInner {
    /// path -> token, in recency order.
    forward: LruCache<String, String>,
    /// token -> path, always the inverse of `forward`.
    reverse: HashMap<String, String>,
}

impl Default for OpaqueIdMapper {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl fmt::Debug for OpaqueIdMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.inner.lock();
        f.debug_struct("OpaqueIdMapper")
            .field("len", &guard.forward.len())
            .field("capacity", &guard.forward.cap())
            .finish()
    }
}

impl OpaqueIdMapper {
    /// Capacity is fixed for the mapper's lifetime; zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(MapperInner {
                forward: LruCache::new(capacity),
                reverse: HashMap::new(),
            }),
        }
    }

    /// Token for `path`, minting one on first sight.
    pub fn id_for(&self, path: &str) -> String {
        let mut guard = self.inner.lock();
        if let Some(token) = guard.forward.get(path) {
            return token.clone();
        }

        let mut token = generate_token();
        while guard.reverse.contains_key(&token) {
            token = generate_token();
        }
        guard.reverse.insert(token.clone(), path.to_owned());
        if let Some((evicted_path, evicted_token)) =
            guard.forward.push(path.to_owned(), token.clone())
        {
            guard.reverse.remove(&evicted_token);
            debug!("Evicted opaque id {} for {}", evicted_token, evicted_path);
        }
        token
    }

    /// Path behind `token`, if it is still cached.
    ///
    /// Malformed tokens are rejected before the lock is taken.
    pub fn path_for(&self, token: &str) -> Option<String> {
        if !is_well_formed(token) {
            return None;
        }
        let mut guard = self.inner.lock();
        let path = guard.reverse.get(token)?.clone();
        guard.forward.promote(&path);
        Some(path)
    }

    /// Whether `path` currently has a token. Does not affect recency.
    pub fn contains_path(&self, path: &str) -> bool {
        self.inner.lock().forward.contains(path)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().forward.cap().get()
    }

    pub fn clear(&self) {
        let mut guard = self.inner.lock();
        guard.forward.clear();
        guard.reverse.clear();
    }
}

#[cfg(test)]
impl MapperInner {
    /// Paths from most to least recently used.
    fn recency(&self) -> Vec<String> {
        self.forward.iter().map(|(path, _)| path.clone()).collect()
    }
}
