// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for the enums that represent configuration choices:
//! key derivation strategies, key sources and bootstrap outcomes.

use serde::{Deserialize, Serialize};

/// How a passphrase string becomes AES key bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDerivation {
    /// UTF-8 bytes of the passphrase, used verbatim
    Raw,
    /// SHA-256 of the passphrase, always 32 bytes, unsalted
    Digest,
    /// PBKDF2-HMAC-SHA256, salted with the passphrase's own first 8 bytes
    Stretched,
}

/// Where the key used by the explicit function surface comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum KeySource {
    #[serde(rename = "raw")]
    RawKey,
    #[serde(rename = "digest")]
    DigestKey,
    #[default]
    #[serde(rename = "stretched")]
    StretchedKey,
    /// The store's content key; the caller's key argument is ignored
    #[serde(rename = "stored")]
    StoredEnvelopeKey,
}

impl KeySource {
    /// The derivation backing this source, `None` for the stored envelope key
    pub fn derivation(self) -> Option<KeyDerivation> {
        match self {
            KeySource::RawKey => Some(KeyDerivation::Raw),
            KeySource::DigestKey => Some(KeyDerivation::Digest),
            KeySource::StretchedKey => Some(KeyDerivation::Stretched),
            KeySource::StoredEnvelopeKey => None,
        }
    }
}

/// Result of `KeyStore::initialize`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// All three artifacts were already present
    Existing,
    /// A fresh key set was generated and written
    Generated,
}
