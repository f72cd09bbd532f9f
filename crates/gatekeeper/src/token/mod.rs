//! Token lifecycle: create, encode, sign, validate, revoke.
//!
//! This module provides:
//!
//! - The wire codec for session tokens
//! - Detached RSA signatures over encoded payloads
//! - The [`Gatekeeper`] orchestrating the full lifecycle

pub mod codec;
pub mod service;
pub mod signature;

pub use codec::{SessionToken, UserId, to_epoch_millis};
pub use service::{Gatekeeper, TOKEN_SEPARATOR};
pub use signature::SignatureEngine;

/// Shared RSA test key pair, generated once per test binary.
#[cfg(test)]
pub(crate) fn test_key_material() -> crate::config::KeyMaterial {
    use rand::rngs::OsRng;
    use rsa::RsaPrivateKey;
    use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
    use std::sync::OnceLock;

    static KEYS: OnceLock<(String, String)> = OnceLock::new();
    let (private_pem, public_pem) = KEYS.get_or_init(|| {
        let private_key = RsaPrivateKey::new(&mut OsRng, 2048).expect("RSA keygen");
        let private_pem = private_key
            .to_pkcs8_pem(LineEnding::LF)
            .expect("PKCS#8 export")
            .to_string();
        let public_pem = private_key
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .expect("SPKI export");
        (private_pem, public_pem)
    });

    crate::config::KeyMaterial::new(private_pem.clone(), public_pem.clone())
}
