//! Error types for token issuance, validation, and storage.
//!
//! The error taxonomy deliberately keeps validation *failures* out of the
//! error channel: a bad signature, an expired token, or a revoked session is
//! an ordinary `false` result from [`validate_token`], not a `GateError`.
//! Errors are reserved for conditions the host must act on - unusable key
//! material, a failing store, or a payload that decoded incorrectly after
//! its signature verified.
//!
//! [`validate_token`]: crate::token::Gatekeeper::validate_token

/// Errors that can occur during token and key operations.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The key material could not be parsed or decrypted.
    ///
    /// Raised at [`Gatekeeper`](crate::token::Gatekeeper) construction; this
    /// is a fatal configuration error, not something to retry.
    #[error("Invalid key material: {message}")]
    InvalidKey {
        /// Description of why the key is unusable.
        message: String,
    },

    /// The token payload could not be decoded.
    #[error("Malformed token: {message}")]
    MalformedToken {
        /// Description of what failed to decode.
        message: String,
    },

    /// The token signature did not verify.
    ///
    /// Only surfaced by [`inspect_token`](crate::token::Gatekeeper::inspect_token),
    /// where the caller asked for a reason; `validate_token` folds this
    /// condition into a `false` result instead.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signature computation failed.
    #[error("Signing error: {message}")]
    Signing {
        /// Description of the signing failure.
        message: String,
    },

    /// A payload passed signature verification but failed to decode.
    ///
    /// This indicates the verifying key does not belong to the issuing
    /// domain, or that the wire format changed underneath the keys. It is
    /// surfaced as an error rather than a `false` validation result because
    /// it is a configuration problem, not a deny decision.
    #[error("Codec corruption on verified payload: {message}")]
    CodecCorruption {
        /// Description of the decode failure.
        message: String,
    },

    /// The external token store reported a failure.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage failure.
        message: String,
    },
}

impl GateError {
    /// Creates a new `InvalidKey` error.
    #[must_use]
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey {
            message: message.into(),
        }
    }

    /// Creates a new `MalformedToken` error.
    #[must_use]
    pub fn malformed_token(message: impl Into<String>) -> Self {
        Self::MalformedToken {
            message: message.into(),
        }
    }

    /// Creates a new `Signing` error.
    #[must_use]
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Creates a new `CodecCorruption` error.
    #[must_use]
    pub fn codec_corruption(message: impl Into<String>) -> Self {
        Self::CodecCorruption {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Returns `true` if this error means the core was constructed with
    /// unusable configuration (bad or undecryptable key material).
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidKey { .. })
    }

    /// Returns `true` if this error describes untrustworthy input data
    /// rather than a broken collaborator.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::MalformedToken { .. } | Self::InvalidSignature)
    }

    /// Returns `true` if this error originated in the external token store.
    #[must_use]
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}
