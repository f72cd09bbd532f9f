//! # gatekeeper-store-memory
//!
//! Process-local, in-memory [`TokenStore`] backend.
//!
//! Suitable for tests, demos, and single-process hosts. Revocation records
//! live in a `HashMap` behind an async `RwLock` and vanish when the process
//! exits; production hosts wanting durable or shared deny lists implement
//! [`TokenStore`] over their own storage instead.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use gatekeeper::{GateResult, TokenStore};

/// In-memory deny list keyed by session id.
///
/// Concurrent use from multiple tasks (or multiple `Gatekeeper` instances)
/// is safe; the lock serializes writers and admits parallel readers.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    revoked: RwLock<HashMap<String, i64>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of revocation records currently held.
    pub async fn revoked_count(&self) -> usize {
        self.revoked.read().await.len()
    }

    /// Drops revocation records older than `cutoff_millis`.
    ///
    /// Hosts call this periodically with a cutoff at or before the oldest
    /// still-live token expiration; records for tokens that have expired
    /// anyway serve no purpose. Returns the number of records removed.
    pub async fn prune_before(&self, cutoff_millis: i64) -> usize {
        let mut revoked = self.revoked.write().await;
        let before = revoked.len();
        revoked.retain(|_, revoked_at| *revoked_at >= cutoff_millis);
        before - revoked.len()
    }

    /// Removes every revocation record.
    pub async fn clear(&self) {
        self.revoked.write().await.clear();
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn add_to_deny_list(&self, session_id: &str, revoked_at_millis: i64) -> GateResult<bool> {
        self.revoked
            .write()
            .await
            .insert(session_id.to_string(), revoked_at_millis);
        Ok(true)
    }

    async fn is_on_deny_list(&self, session_id: &str) -> GateResult<bool> {
        Ok(self.revoked.read().await.contains_key(session_id))
    }
}
