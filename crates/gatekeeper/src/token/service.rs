//! Session token orchestration.
//!
//! [`Gatekeeper`] wires the codec, the signature engine, and the external
//! [`TokenStore`] into the token lifecycle:
//!
//! - `create_token` - mint, encode, sign
//! - `validate_token` - verify, decode, check expiration and revocation
//! - `revoke_token` - record the session on the deny list
//! - `validate_user` - evaluate a subject against a [`Ruleset`]
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use gatekeeper::{Gatekeeper, KeyMaterial};
//!
//! let keys = KeyMaterial::new(private_pem, public_pem);
//! let gate = Gatekeeper::new(store, &keys)?;
//!
//! let encoded = gate.create_token("alice", expires_at)?;
//! assert!(gate.validate_token(&encoded).await?);
//! ```
//!
//! # Security
//!
//! Validation checks the signature strictly before inspecting payload
//! contents; expiration and revocation decisions are never made on
//! unauthenticated data. Token strings are never logged.

use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::GateResult;
use crate::config::KeyMaterial;
use crate::error::GateError;
use crate::ruleset::Ruleset;
use crate::storage::TokenStore;
use crate::token::codec::{self, SessionToken, UserId, to_epoch_millis};
use crate::token::signature::SignatureEngine;

/// Separator between the payload and signature segments of an encoded token.
pub const TOKEN_SEPARATOR: char = '.';

/// Issues, revokes, and validates signed session tokens.
///
/// Owns the parsed key material for its whole lifetime and holds the
/// deny-list store as an injected capability. All state is read-only after
/// construction from the core's perspective; a `Gatekeeper` can be shared
/// freely across tasks.
pub struct Gatekeeper {
    /// Signs and verifies token payloads.
    signature: SignatureEngine,

    /// External deny-list storage.
    store: Arc<dyn TokenStore>,
}

impl Gatekeeper {
    /// Creates a gatekeeper from a deny-list store and PEM key material.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidKey`] if the key material fails to parse
    /// or decrypt. This is fatal: a gatekeeper is never constructed with
    /// unusable keys.
    pub fn new(store: Arc<dyn TokenStore>, keys: &KeyMaterial) -> GateResult<Self> {
        let signature = SignatureEngine::from_pem(keys)?;
        Ok(Self { signature, store })
    }

    /// Issues a signed token for `user_id` expiring at `expires_at`.
    ///
    /// Mints a fresh random session id (not derived from the user id or the
    /// clock), encodes the token, signs the payload, and returns
    /// `"{payload}.{signature}"`. Never rejects a well-formed input pair and
    /// never touches the store.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Signing`] if signature computation fails.
    pub fn create_token(
        &self,
        user_id: impl Into<UserId>,
        expires_at: OffsetDateTime,
    ) -> GateResult<String> {
        let token = SessionToken {
            session_id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            expiration_time: to_epoch_millis(expires_at),
        };

        let payload = codec::encode(&token)?;
        let signature = self.signature.sign(&payload)?;

        tracing::debug!(session_id = %token.session_id, "Issued session token");
        Ok(format!("{payload}{TOKEN_SEPARATOR}{signature}"))
    }

    /// Records `session_id` on the deny list, returning the store's success
    /// signal verbatim.
    ///
    /// The session id is not checked against previously issued tokens;
    /// revoking an unknown or already-revoked id succeeds (revocation is
    /// idempotent by design).
    ///
    /// # Errors
    ///
    /// Propagates store failures unmodified; no retries.
    pub async fn revoke_token(&self, session_id: &str) -> GateResult<bool> {
        let revoked_at = to_epoch_millis(OffsetDateTime::now_utc());
        let persisted = self.store.add_to_deny_list(session_id, revoked_at).await?;

        tracing::debug!(session_id = %session_id, persisted, "Revoked session");
        Ok(persisted)
    }

    /// Validates an encoded token: signature, expiration, then deny list.
    ///
    /// Total over any string input. Validation failures - empty or malformed
    /// input, a bad signature, an expired token, a revoked session - are
    /// `Ok(false)`, never errors; callers make allow/deny decisions on the
    /// boolean alone.
    ///
    /// # Errors
    ///
    /// - [`GateError::Storage`] if the deny-list query fails (propagated
    ///   unmodified).
    /// - [`GateError::CodecCorruption`] if a payload that passed signature
    ///   verification fails to decode - a key/format mismatch the host must
    ///   see, not a deny decision.
    pub async fn validate_token(&self, encoded: &str) -> GateResult<bool> {
        // 1. Empty input is trivially invalid.
        if encoded.is_empty() {
            return Ok(false);
        }

        // 2. Split payload from signature. A missing separator leaves an
        //    empty signature segment, which fails verification below; this
        //    stage cannot fail on its own.
        let (payload, signature) = match encoded.split_once(TOKEN_SEPARATOR) {
            Some(parts) => parts,
            None => (encoded, ""),
        };

        // 3. Verify before trusting any payload contents.
        if !self.signature.verify(payload, signature) {
            tracing::debug!("Token signature rejected");
            return Ok(false);
        }

        // 4. Decode the verified payload. Failure here means the verifying
        //    key does not match the issuing domain.
        let token = codec::decode(payload).map_err(|e| {
            tracing::error!(error = %e, "Verified payload failed to decode");
            GateError::codec_corruption(e.to_string())
        })?;

        // 5. Expiration.
        if token.is_expired(OffsetDateTime::now_utc()) {
            tracing::debug!(session_id = %token.session_id, "Token expired");
            return Ok(false);
        }

        // 6. Deny list.
        let revoked = self.store.is_on_deny_list(&token.session_id).await?;
        if revoked {
            tracing::debug!(session_id = %token.session_id, "Token revoked");
        }
        Ok(!revoked)
    }

    /// Evaluates `subject` against a ruleset: synchronous rules first, and
    /// only if they all pass, the asynchronous rules.
    ///
    /// Cheap checks gate expensive ones: when the synchronous half fails, no
    /// asynchronous rule is ever invoked.
    pub async fn validate_user<S>(&self, subject: &S, ruleset: &Ruleset<S>) -> bool {
        if !ruleset.evaluate_sync(subject) {
            return false;
        }
        ruleset.evaluate_async(subject).await
    }

    /// Verifies an encoded token's signature and returns the decoded record.
    ///
    /// Ignores expiration and the deny list - this is an introspection
    /// surface, used by hosts that need the session id of a token they hold
    /// (for example to pass it to [`revoke_token`](Self::revoke_token)).
    ///
    /// # Errors
    ///
    /// - [`GateError::MalformedToken`] if the input does not split into
    ///   payload and signature segments, or the verified payload fails to
    ///   decode.
    /// - [`GateError::InvalidSignature`] if the signature does not verify.
    pub fn inspect_token(&self, encoded: &str) -> GateResult<SessionToken> {
        let (payload, signature) = encoded
            .split_once(TOKEN_SEPARATOR)
            .ok_or_else(|| GateError::malformed_token("Missing payload/signature separator"))?;

        if !self.signature.verify(payload, signature) {
            return Err(GateError::InvalidSignature);
        }

        codec::decode(payload)
    }
}

impl std::fmt::Debug for Gatekeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gatekeeper").finish_non_exhaustive()
    }
}
