//! Query cache: the latest response per request key, kept so a failed
//! refetch can still show the last known data, and dropped on invalidation.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

/// Cache key: the owning session plus the query name and its parameters,
/// e.g. `["users", "2", "10"]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    session: Uuid,
    parts: Vec<String>,
}

impl QueryKey {
    pub fn new(session: Uuid, parts: &[&str]) -> Self {
        QueryKey {
            session,
            parts: parts.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn users(session: Uuid, page: u32, limit: u32) -> Self {
        Self::new(session, &["users", &page.to_string(), &limit.to_string()])
    }

    pub fn monthly_stats(session: Uuid, year: i32, month: u32) -> Self {
        Self::new(session, &["monthly-stats", &year.to_string(), &month.to_string()])
    }

    pub fn session(&self) -> Uuid {
        self.session
    }

    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        prefix.len() <= self.parts.len() && self.parts.iter().zip(prefix).all(|(a, b)| a == b)
    }
}

#[derive(Clone, Debug)]
struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

/// Result of running a query through the cache.
#[derive(Debug)]
pub enum QueryOutcome<V, E> {
    Fresh(V),
    /// The fetch failed; `stale` is the last value cached for the key, if any.
    Failed { error: E, stale: Option<V> },
}

impl<V, E> QueryOutcome<V, E> {
    pub fn data(&self) -> Option<&V> {
        match self {
            QueryOutcome::Fresh(v) => Some(v),
            QueryOutcome::Failed { stale, .. } => stale.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            QueryOutcome::Fresh(_) => None,
            QueryOutcome::Failed { error, .. } => Some(error),
        }
    }
}

#[derive(Clone, Debug)]
pub struct QueryCache<V> {
    entries: Arc<DashMap<QueryKey, CacheEntry<V>>>,
    cache_time: Duration,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(cache_time: Duration) -> Self {
        QueryCache {
            entries: Arc::new(DashMap::new()),
            cache_time,
        }
    }

    pub fn get(&self, key: &QueryKey) -> Option<V> {
        let cache_time = self.cache_time;
        self.entries
            .remove_if(key, |_, entry| entry.fetched_at.elapsed() > cache_time);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Last write wins.
    pub fn put(&self, key: QueryKey, value: V) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Always refetches; on failure falls back to whatever is cached for `key`.
    pub async fn fetch<F, Fut, E>(&self, key: QueryKey, fetch: F) -> QueryOutcome<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        match fetch().await {
            Ok(value) => {
                self.put(key, value.clone());
                QueryOutcome::Fresh(value)
            }
            Err(error) => QueryOutcome::Failed {
                error,
                stale: self.get(&key),
            },
        }
    }

    /// Drops every entry whose key starts with `prefix`, for all sessions.
    pub fn invalidate(&self, prefix: &[&str]) -> usize {
        let before = self.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        let dropped = before.saturating_sub(self.len());
        debug!(?prefix, dropped, "invalidated cached queries");
        dropped
    }

    pub fn forget_session(&self, session: Uuid) {
        self.entries.retain(|key, _| key.session() != session);
    }

    pub fn purge_expired(&self) {
        let cache_time = self.cache_time;
        self.entries
            .retain(|_, entry| entry.fetched_at.elapsed() <= cache_time);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
