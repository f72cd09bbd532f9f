//! Token wire codec.
//!
//! Converts a [`SessionToken`] to and from its transport form: the token is
//! serialized to a JSON object and base64-encoded. No cryptography happens
//! here - the codec produces the *payload* half of an encoded token; signing
//! is layered on top by [`SignatureEngine`](crate::token::SignatureEngine).
//!
//! Wire shape of the decoded payload:
//!
//! ```json
//! {"sessionId": "…", "userId": "…", "expirationTime": 1893456000000}
//! ```

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::GateResult;
use crate::error::GateError;

/// Caller-supplied user identifier.
///
/// Hosts identify users by string or by integer; the wire format carries
/// whichever form was supplied, untagged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    /// Numeric user identifier.
    Integer(i64),
    /// Textual user identifier.
    Text(String),
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self::Integer(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(id) => write!(f, "{id}"),
            Self::Text(id) => write!(f, "{id}"),
        }
    }
}

/// A session token record.
///
/// Created only by [`Gatekeeper::create_token`](crate::token::Gatekeeper::create_token)
/// and never mutated afterwards. The record itself is stateless: a token is
/// "destroyed" by expiring or landing on the deny list, at which point
/// validation rejects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    /// Random 128-bit identifier minted at issuance; the revocation key.
    pub session_id: String,

    /// Caller-supplied user identifier.
    pub user_id: UserId,

    /// Absolute expiration instant, epoch milliseconds.
    pub expiration_time: i64,
}

impl SessionToken {
    /// Returns `true` if the token's expiration instant lies before `now`.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expiration_time < to_epoch_millis(now)
    }

    /// Returns the expiration instant as an [`OffsetDateTime`].
    ///
    /// # Errors
    ///
    /// Returns `MalformedToken` if the stored millisecond value is outside
    /// the representable range.
    pub fn expires_at(&self) -> GateResult<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.expiration_time) * 1_000_000)
            .map_err(|e| GateError::malformed_token(format!("Expiration out of range: {e}")))
    }
}

/// Converts an instant to epoch milliseconds (the wire precision).
#[must_use]
pub fn to_epoch_millis(instant: OffsetDateTime) -> i64 {
    (instant.unix_timestamp_nanos() / 1_000_000) as i64
}

/// Serializes a token to canonical JSON and base64-encodes it.
///
/// Field order is stable for a given serde version but decoders key on field
/// names, not positions.
///
/// # Errors
///
/// Returns `MalformedToken` if JSON serialization fails (not reachable for
/// well-formed tokens).
pub fn encode(token: &SessionToken) -> GateResult<String> {
    let json = serde_json::to_vec(token)
        .map_err(|e| GateError::malformed_token(format!("Serialization failed: {e}")))?;
    Ok(STANDARD.encode(json))
}

/// Base64-decodes and deserializes a token payload.
///
/// # Errors
///
/// Returns `MalformedToken` if the payload is not valid base64, the decoded
/// bytes are not valid JSON, or a required field is missing.
pub fn decode(payload: &str) -> GateResult<SessionToken> {
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| GateError::malformed_token(format!("Invalid base64 payload: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| GateError::malformed_token(format!("Invalid token JSON: {e}")))
}
