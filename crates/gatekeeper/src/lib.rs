//! # gatekeeper
//!
//! Embeddable authorization core: compact, cryptographically signed session
//! tokens plus composable rule evaluation.
//!
//! This crate provides:
//! - Session token issuance, validation, and revocation
//! - A `base64(json).base64(signature)` wire format with detached RSA
//!   signatures (SHA-256 digest)
//! - Deny-list revocation through a host-supplied storage capability
//! - Ordered synchronous-then-asynchronous rule evaluation with
//!   short-circuiting
//!
//! ## Overview
//!
//! The core has no network layer, no persistence layer, and no
//! user-management concerns. Hosts supply the key material and a
//! [`TokenStore`] for revoked sessions; everything else - transport,
//! key generation, retries, deadlines - stays on the host side. Token
//! payloads are signed, not encrypted: anyone holding an encoded token can
//! read it but cannot alter it.
//!
//! Validation failures (bad signature, expired, revoked, malformed input)
//! are `false` results, not errors; callers never need error handling to
//! make an allow/deny decision.
//!
//! ## Modules
//!
//! - [`config`] - Key material handed over at construction
//! - [`error`] - Error taxonomy and the [`GateResult`] alias
//! - [`ruleset`] - Ordered predicate collections over arbitrary subjects
//! - [`storage`] - The deny-list storage trait implemented by hosts
//! - [`token`] - Codec, signature engine, and the [`Gatekeeper`] orchestrator

pub mod config;
pub mod error;
pub mod ruleset;
pub mod storage;
pub mod token;

pub use config::KeyMaterial;
pub use error::GateError;
pub use ruleset::{AsyncRule, Ruleset, SyncRule, async_rule, sync_rule};
pub use storage::TokenStore;
pub use token::{Gatekeeper, SessionToken, SignatureEngine, TOKEN_SEPARATOR, UserId};

/// Type alias for gatekeeper results.
pub type GateResult<T> = Result<T, GateError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use gatekeeper::prelude::*;
/// ```
pub mod prelude {
    pub use crate::GateResult;
    pub use crate::config::KeyMaterial;
    pub use crate::error::GateError;
    pub use crate::ruleset::{AsyncRule, Ruleset, SyncRule, async_rule, sync_rule};
    pub use crate::storage::TokenStore;
    pub use crate::token::{Gatekeeper, SessionToken, SignatureEngine, TOKEN_SEPARATOR, UserId};
}
