// src/core/derive.rs
//! Passphrase → AES key bytes
//!
//! Three strategies, selected per call site through [`KeyDerivation`].
//! None of them salt per record: the same passphrase always yields the
//! same key.

use pbkdf2::pbkdf2_hmac;
use sha2::{Digest, Sha256};

use crate::aliases::CipherKey;
use crate::consts::STRETCHED_SALT_LEN;
use crate::enums::KeyDerivation;
use crate::error::{CoreError, Result};

/// Parameters only the stretched strategy looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StretchParams {
    pub iterations: u32,
    pub key_size_bits: u32,
}

impl KeyDerivation {
    /// Derive key bytes from `passphrase`
    ///
    /// `Raw` performs no length check here; a wrong-sized passphrase is
    /// rejected by the cipher with `InvalidKeyLength`.
    pub fn derive(self, passphrase: &str, params: StretchParams) -> Result<CipherKey> {
        match self {
            KeyDerivation::Raw => Ok(raw_key(passphrase)),
            KeyDerivation::Digest => Ok(digest_key(passphrase)),
            KeyDerivation::Stretched => {
                stretched_key(passphrase, params.iterations, params.key_size_bits)
            }
        }
    }
}

pub fn raw_key(passphrase: &str) -> CipherKey {
    CipherKey::new(passphrase.as_bytes().to_vec())
}

pub fn digest_key(passphrase: &str) -> CipherKey {
    CipherKey::new(Sha256::digest(passphrase.as_bytes()).to_vec())
}

/// PBKDF2-HMAC-SHA256 with the first 8 passphrase bytes as salt
///
/// The salt is not secret and not random, so this only slows down
/// brute force; it does not defeat precomputation for common passphrases.
/// Kept as-is so keys stay compatible with data already encrypted.
pub fn stretched_key(passphrase: &str, iterations: u32, key_size_bits: u32) -> Result<CipherKey> {
    let bytes = passphrase.as_bytes();
    if bytes.len() < STRETCHED_SALT_LEN {
        return Err(CoreError::PassphraseTooShort {
            len: bytes.len(),
            min: STRETCHED_SALT_LEN,
        });
    }
    if iterations == 0 {
        return Err(CoreError::Configuration(
            "pbkdf2_iterations must be non-zero".into(),
        ));
    }

    let salt = &bytes[..STRETCHED_SALT_LEN];
    let mut out = vec![0u8; (key_size_bits / 8) as usize];
    pbkdf2_hmac::<Sha256>(bytes, salt, iterations, &mut out);
    Ok(CipherKey::new(out))
}
