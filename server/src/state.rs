use std::sync::Arc;
use std::time::Duration;

use admin_api_client::{AdminGateway, UsersPage};
use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use crate::cache::QueryCache;
use crate::config::Settings;
use crate::error::AppError;
use crate::views::Views;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn AdminGateway>,
    pub views: Views,
    pub users: QueryCache<UsersPage>,
    pub stats: QueryCache<Value>,
    /// Ids with a delete request in flight.
    pub pending_deletes: Arc<DashMap<String, ()>>,
    pub session_secret: Arc<[u8]>,
    pub session_ttl: Duration,
    pub page_size: u32,
}

impl AppState {
    pub fn new(api: Arc<dyn AdminGateway>, settings: &Settings) -> Result<Self, AppError> {
        Ok(AppState {
            api,
            views: Views::new()?,
            users: QueryCache::new(settings.cache_time()),
            stats: QueryCache::new(settings.cache_time()),
            pending_deletes: Arc::new(DashMap::new()),
            session_secret: Arc::from(settings.session_secret.as_bytes()),
            session_ttl: settings.session_ttl(),
            page_size: settings.page_size(),
        })
    }

    /// Drops everything cached on behalf of a session that ended.
    pub fn forget_session(&self, session: Uuid) {
        self.users.forget_session(session);
        self.stats.forget_session(session);
    }

    pub fn purge_expired(&self) {
        self.users.purge_expired();
        self.stats.purge_expired();
    }

    pub fn is_delete_pending(&self, user_id: &str) -> bool {
        self.pending_deletes.contains_key(user_id)
    }

    /// Marks `user_id` as being deleted. `None` if a delete is already in flight.
    pub fn begin_delete(&self, user_id: &str) -> Option<PendingDelete> {
        if self.pending_deletes.insert(user_id.to_string(), ()).is_some() {
            return None;
        }
        Some(PendingDelete {
            markers: Arc::clone(&self.pending_deletes),
            user_id: user_id.to_string(),
        })
    }
}

/// Clears the pending-delete marker when dropped, including when the
/// request is cancelled mid-flight.
pub struct PendingDelete {
    markers: Arc<DashMap<String, ()>>,
    user_id: String,
}

impl Drop for PendingDelete {
    fn drop(&mut self) {
        self.markers.remove(&self.user_id);
    }
}
