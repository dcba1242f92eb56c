// src/error.rs
//! Public error type for the entire crate

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Malformed key material: {0}")]
    KeyFormat(String),

    #[error("Private key could not be decrypted with the supplied passphrase")]
    WrongPassphrase,

    #[error("Content key could not be unwrapped: {0}")]
    KeyUnwrap(String),

    #[error("Invalid AES key length: {0} bytes (expected 16, 24 or 32)")]
    InvalidKeyLength(usize),

    #[error("Invalid IV length: {0} bytes (expected 16)")]
    InvalidIvLength(usize),

    #[error("Bad padding: ciphertext is corrupted or key/IV do not match")]
    BadPadding,

    #[error("Passphrase too short for stretched derivation: {len} bytes (need at least {min})")]
    PassphraseTooShort { len: usize, min: usize },

    #[error("Ciphertext is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),
}

impl CoreError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CoreError::Storage {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
