//! Fingerprinting helpers

use blake3::Hasher;
use rsa::pkcs8::EncodePublicKey;
use rsa::RsaPublicKey;

use crate::error::{CoreError, Result};

/// Compute BLAKE3 hash and return as lowercase hex string
pub fn blake3_hex(data: &[u8]) -> String {
    Hasher::new().update(data).finalize().to_hex().to_string()
}

/// Stable identifier of a public key: BLAKE3 over its SPKI DER
///
/// Safe to log; identifies which key pair a deployment is running with.
pub fn public_key_fingerprint(key: &RsaPublicKey) -> Result<String> {
    let der = key
        .to_public_key_der()
        .map_err(|e| CoreError::KeyFormat(format!("SPKI encoding failed: {e}")))?;
    Ok(blake3_hex(der.as_bytes()))
}
