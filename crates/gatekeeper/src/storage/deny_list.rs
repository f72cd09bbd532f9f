//! Deny-list storage trait.
//!
//! When a session is revoked, its id is recorded on a deny list that
//! validation consults for every otherwise-valid token. The list maps
//! session ids to revocation timestamps so backends can prune records once
//! the corresponding tokens would have expired anyway.
//!
//! # Concurrency
//!
//! The core makes no locking assumptions and does not serialize access:
//! concurrent calls from multiple [`Gatekeeper`](crate::token::Gatekeeper)
//! instances or tasks against the same store must be made safe by the store
//! implementation itself.
//!
//! # Example implementation
//!
//! ```ignore
//! use gatekeeper::{GateResult, storage::TokenStore};
//!
//! struct MemoryStore {
//!     revoked: tokio::sync::RwLock<std::collections::HashMap<String, i64>>,
//! }
//!
//! #[async_trait::async_trait]
//! impl TokenStore for MemoryStore {
//!     async fn add_to_deny_list(&self, session_id: &str, revoked_at_millis: i64) -> GateResult<bool> {
//!         self.revoked.write().await.insert(session_id.to_string(), revoked_at_millis);
//!         Ok(true)
//!     }
//!
//!     async fn is_on_deny_list(&self, session_id: &str) -> GateResult<bool> {
//!         Ok(self.revoked.read().await.contains_key(session_id))
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::GateResult;

/// External storage for revoked session ids.
///
/// Implemented by the host, consumed by the core. Backends are expected to
/// make `is_on_deny_list` fast - it runs on every token validation.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Records a session id as revoked.
    ///
    /// `revoked_at_millis` is the revocation instant in epoch milliseconds.
    /// Returns the backend's success signal: `true` if the record was
    /// persisted.
    ///
    /// # Idempotency
    ///
    /// Revoking an unknown or already-revoked id is not an error; the call
    /// should succeed without complaint.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails. The core propagates
    /// it to the caller unmodified and never retries.
    async fn add_to_deny_list(&self, session_id: &str, revoked_at_millis: i64) -> GateResult<bool>;

    /// Returns `true` if a revocation record exists for the session id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails. The core propagates
    /// it to the caller unmodified and never retries.
    async fn is_on_deny_list(&self, session_id: &str) -> GateResult<bool>;
}
