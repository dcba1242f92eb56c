// src/core/envelope.rs
//! Envelope encryption of the content key under the RSA key pair
//!
//! The wrapped form is the raw RSA ciphertext (PKCS#1 v1.5 padding), so
//! its length always equals the modulus size in bytes.

use rsa::rand_core::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

use crate::aliases::ContentKey32;
use crate::consts::CONTENT_KEY_LEN;
use crate::error::{CoreError, Result};

pub fn wrap_content_key(key: &ContentKey32, public_key: &RsaPublicKey) -> Result<Vec<u8>> {
    public_key
        .encrypt(&mut OsRng, Pkcs1v15Encrypt, key.expose_secret())
        .map_err(|e| CoreError::KeyGeneration(format!("RSA wrap failed: {e}")))
}

pub fn unwrap_content_key(wrapped: &[u8], private_key: &RsaPrivateKey) -> Result<ContentKey32> {
    if wrapped.len() != private_key.size() {
        return Err(CoreError::KeyUnwrap(format!(
            "wrapped key is {} bytes, modulus is {}",
            wrapped.len(),
            private_key.size()
        )));
    }

    let bytes = private_key
        .decrypt(Pkcs1v15Encrypt, wrapped)
        .map_err(|e| CoreError::KeyUnwrap(e.to_string()))?;

    let arr: [u8; CONTENT_KEY_LEN] = bytes.as_slice().try_into().map_err(|_| {
        CoreError::KeyUnwrap(format!(
            "unwrapped key is {} bytes, expected {CONTENT_KEY_LEN}",
            bytes.len()
        ))
    })?;
    Ok(ContentKey32::new(arr))
}
