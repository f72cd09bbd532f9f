//! Detached RSA signatures over token payloads.
//!
//! The engine wraps a parsed key pair and produces PKCS#1 v1.5 signatures
//! over the SHA-256 digest of the exact payload bytes. Signatures travel
//! base64-encoded in the second segment of an encoded token.
//!
//! Verification is a total function: a signature that fails to decode, has
//! the wrong length, or was produced under a different key yields `false`,
//! never an error. Verification failure is data, not a fault.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::GateResult;
use crate::config::KeyMaterial;
use crate::error::GateError;

/// Signs and verifies token payloads with a fixed RSA key pair.
///
/// The key pair is parsed once at construction and owned by the engine for
/// its whole lifetime; nothing exposes it afterwards.
pub struct SignatureEngine {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
}

impl SignatureEngine {
    /// Parses a PEM key pair into a signature engine.
    ///
    /// The private key may be PKCS#8 (encrypted or not) or PKCS#1; the
    /// public key may be SPKI or PKCS#1. An encrypted private key requires
    /// `keys.passphrase`.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::InvalidKey`] if either PEM document fails to
    /// parse or the passphrase does not decrypt the private key. This is a
    /// fatal configuration error.
    pub fn from_pem(keys: &KeyMaterial) -> GateResult<Self> {
        let private_key = match &keys.passphrase {
            Some(passphrase) => {
                RsaPrivateKey::from_pkcs8_encrypted_pem(&keys.private_key_pem, passphrase.as_bytes())
                    .map_err(|e| {
                        GateError::invalid_key(format!("Encrypted private key rejected: {e}"))
                    })?
            }
            None => RsaPrivateKey::from_pkcs8_pem(&keys.private_key_pem)
                .or_else(|_| RsaPrivateKey::from_pkcs1_pem(&keys.private_key_pem))
                .map_err(|e| GateError::invalid_key(format!("Private key rejected: {e}")))?,
        };

        let public_key = RsaPublicKey::from_public_key_pem(&keys.public_key_pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(&keys.public_key_pem))
            .map_err(|e| GateError::invalid_key(format!("Public key rejected: {e}")))?;

        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// Signs the exact bytes of `payload`, returning the signature
    /// base64-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Signing`] if signature computation fails.
    pub fn sign(&self, payload: &str) -> GateResult<String> {
        let digest = Sha256::digest(payload.as_bytes());
        let signature = self
            .private_key
            .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
            .map_err(|e| GateError::signing(e.to_string()))?;

        Ok(STANDARD.encode(signature))
    }

    /// Verifies a base64-encoded signature over `payload`.
    ///
    /// Returns `false` for any mismatch, including structurally invalid
    /// signature encodings. Never errors.
    #[must_use]
    pub fn verify(&self, payload: &str, encoded_signature: &str) -> bool {
        let Ok(signature) = STANDARD.decode(encoded_signature) else {
            return false;
        };

        let digest = Sha256::digest(payload.as_bytes());
        self.public_key
            .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, &signature)
            .is_ok()
    }
}

// Key material must never leak through Debug formatting.
impl std::fmt::Debug for SignatureEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureEngine").finish_non_exhaustive()
    }
}
