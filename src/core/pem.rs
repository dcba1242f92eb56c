// src/core/pem.rs
//! PEM armor for the RSA key pair
//!
//! Private keys: PKCS#8 `EncryptedPrivateKeyInfo`, PBES2 with
//! PBKDF2-HMAC-SHA256 and AES-256-CBC. Public keys: cleartext
//! `SubjectPublicKeyInfo`.

use pkcs8::der::{Decode, SecretDocument};
use pkcs8::pkcs5::{self, pbes2};
use pkcs8::{EncryptedPrivateKeyInfo, LineEnding, PrivateKeyInfo};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::aliases::KeyPassphrase;
use crate::consts::{
    AES_BLOCK_SIZE, ENCRYPTED_PRIVATE_KEY_LABEL, PEM_PBKDF2_ITERATIONS, PEM_SALT_LEN,
};
use crate::error::{CoreError, Result};

fn encode_err(e: impl std::fmt::Display) -> CoreError {
    CoreError::KeyGeneration(format!("PKCS#8 encoding failed: {e}"))
}

/// Serialize + encrypt + armor a private key
pub fn encode_private_key(key: &RsaPrivateKey, passphrase: &KeyPassphrase) -> Result<String> {
    let der = key.to_pkcs8_der().map_err(encode_err)?;
    let info = PrivateKeyInfo::from_der(der.as_bytes()).map_err(encode_err)?;

    let salt: [u8; PEM_SALT_LEN] = rand::random();
    let iv: [u8; AES_BLOCK_SIZE] = rand::random();
    let params = pbes2::Parameters::pbkdf2_sha256_aes256cbc(PEM_PBKDF2_ITERATIONS, &salt, &iv)
        .map_err(encode_err)?;

    let encrypted = info
        .encrypt_with_params(params, passphrase.expose_secret().as_bytes())
        .map_err(encode_err)?;
    let pem = encrypted
        .to_pem(ENCRYPTED_PRIVATE_KEY_LABEL, LineEnding::LF)
        .map_err(encode_err)?;
    Ok(pem.to_string())
}

/// Armor a public key, no encryption
pub fn encode_public_key(key: &RsaPublicKey) -> Result<String> {
    key.to_public_key_pem(LineEnding::LF).map_err(encode_err)
}

/// Parse + decrypt a private key PEM
///
/// Structural problems with the armor or the outer ASN.1, and encryption
/// algorithms this crate cannot run, are `KeyFormat`. A failed decryption
/// or undecodable plaintext is `WrongPassphrase`: a bad passphrase normally
/// trips the CBC padding check, and in the rare case it doesn't, the
/// decrypted bytes fail to parse as a key.
pub fn decode_private_key(pem: &str, passphrase: &KeyPassphrase) -> Result<RsaPrivateKey> {
    let (label, doc) = SecretDocument::from_pem(pem)
        .map_err(|e| CoreError::KeyFormat(format!("private key PEM: {e}")))?;
    if label != ENCRYPTED_PRIVATE_KEY_LABEL {
        return Err(CoreError::KeyFormat(format!(
            "expected `{ENCRYPTED_PRIVATE_KEY_LABEL}` PEM, found `{label}`"
        )));
    }

    let encrypted = EncryptedPrivateKeyInfo::from_der(doc.as_bytes())
        .map_err(|e| CoreError::KeyFormat(format!("EncryptedPrivateKeyInfo: {e}")))?;

    let decrypted = encrypted
        .decrypt(passphrase.expose_secret().as_bytes())
        .map_err(|e| match e {
            // Unsupported scheme, KDF or PRF: nothing to do with the passphrase
            pkcs8::Error::EncryptedPrivateKey(inner)
                if !matches!(inner, pkcs5::Error::DecryptFailed) =>
            {
                CoreError::KeyFormat(format!("private key encryption: {inner}"))
            }
            // Padding failure, or decrypted bytes that are not DER
            _ => CoreError::WrongPassphrase,
        })?;

    RsaPrivateKey::from_pkcs8_der(decrypted.as_bytes()).map_err(|_| CoreError::WrongPassphrase)
}

/// Parse a public key PEM
pub fn decode_public_key(pem: &str) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .map_err(|e| CoreError::KeyFormat(format!("public key PEM: {e}")))
}
