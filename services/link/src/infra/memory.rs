use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::repository::CodeStore;
use crate::domain::types::LinkCode;
use crate::error::LinkServiceError;

/// Process-local mirror of the durable code store, keyed by code value.
///
/// Created once at startup and shared through the app state; entries are
/// evicted by the sweep or by lookups that find them expired, and the map is
/// never persisted. Not synchronized across server instances — in a
/// multi-instance deployment the durable store is the sole source of truth
/// and this map is a best-effort fallback only.
#[derive(Clone, Default)]
pub struct MemoryCodeStore {
    entries: Arc<RwLock<HashMap<String, LinkCode>>>,
}

impl MemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CodeStore for MemoryCodeStore {
    async fn insert(&self, code: &LinkCode) -> Result<(), LinkServiceError> {
        self.entries
            .write()
            .expect("mirror lock poisoned")
            .insert(code.code.clone(), code.clone());
        Ok(())
    }

    async fn find_live(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<LinkCode>, LinkServiceError> {
        let mut entries = self.entries.write().expect("mirror lock poisoned");
        if let Some(entry) = entries.get(code) {
            if entry.is_live(now) {
                return Ok(Some(entry.clone()));
            }
        }
        // Expired entries are evicted the moment a lookup sees them;
        // removing an absent key is a no-op.
        entries.remove(code);
        Ok(None)
    }

    async fn find_live_for_account(
        &self,
        account_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<LinkCode>, LinkServiceError> {
        let mut entries = self.entries.write().expect("mirror lock poisoned");
        entries.retain(|_, entry| entry.account_id != account_id || entry.is_live(now));
        Ok(entries
            .values()
            .filter(|entry| entry.account_id == account_id)
            .max_by_key(|entry| entry.created_at)
            .cloned())
    }

    async fn list_live(&self, now: DateTime<Utc>) -> Result<Vec<LinkCode>, LinkServiceError> {
        let entries = self.entries.read().expect("mirror lock poisoned");
        let mut live: Vec<LinkCode> = entries
            .values()
            .filter(|entry| entry.is_live(now))
            .cloned()
            .collect();
        live.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(live)
    }

    async fn delete(&self, code: &str) -> Result<bool, LinkServiceError> {
        Ok(self
            .entries
            .write()
            .expect("mirror lock poisoned")
            .remove(code)
            .is_some())
    }

    async fn delete_for_account(&self, account_id: Uuid) -> Result<u64, LinkServiceError> {
        let mut entries = self.entries.write().expect("mirror lock poisoned");
        let before = entries.len();
        entries.retain(|_, entry| entry.account_id != account_id);
        Ok((before - entries.len()) as u64)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, LinkServiceError> {
        let mut entries = self.entries.write().expect("mirror lock poisoned");
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        Ok((before - entries.len()) as u64)
    }
}
