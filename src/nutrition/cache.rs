use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use super::types::FoodCandidate;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<FoodCandidate>,
    inserted_at: Instant,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, CacheEntry>,
    // insertion order, oldest first
    order: VecDeque<String>,
}

/// TTL cache of search results keyed by query and page size.
///
/// Expiry is lazy: stale entries stay in memory until they are overwritten or
/// pushed out by the entry limit, but `get` never returns them.
#[derive(Debug)]
pub struct SearchCache {
    inner: RwLock<Inner>,
    ttl: Duration,
    max_entries: usize,
}

impl SearchCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            ttl,
            max_entries: max_entries.max(1),
        }
    }

    pub fn key(query: &str, page_size: u32) -> String {
        format!("{}:{}", query.trim(), page_size)
    }

    pub async fn get(&self, key: &str) -> Option<Vec<FoodCandidate>> {
        let inner = self.inner.read().await;
        let entry = inner.entries.get(key)?;
        if entry.inserted_at.elapsed() > self.ttl {
            debug!(key, "search cache entry expired");
            return None;
        }
        Some(entry.value.clone())
    }

    pub async fn set(&self, key: String, value: Vec<FoodCandidate>) {
        let mut inner = self.inner.write().await;
        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
        };
        if inner.entries.insert(key.clone(), entry).is_some() {
            inner.order.retain(|k| k != &key);
        }
        inner.order.push_back(key);

        while inner.entries.len() > self.max_entries {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
            debug!(key = %oldest, "search cache evicted oldest entry");
        }
    }

    /// Number of stored entries, stale ones included.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }
}
