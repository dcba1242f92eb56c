// src/lib.rs
//! udf-crypt: encryption-at-rest keys and AES-CBC functions for query-engine UDFs
//!
//! Features:
//! - RSA key pair, private key PEM protected by a passphrase
//! - 256-bit content key stored RSA-wrapped next to the PEMs
//! - AES-CBC/PKCS#5 over text (base64) and binary payloads
//! - Raw, SHA-256 and PBKDF2 passphrase-to-key derivations
//! - Full secure-gate integration for key material

pub mod aliases;
pub mod config;
pub mod consts;
pub mod context;
pub mod core;
pub mod enums;
pub mod error;
pub mod key_store;

// Re-export everything users need at the crate root
pub use aliases::{CipherKey, ContentKey32, KeyPassphrase, SecureConversionsExt, SecureRandomExt};
pub use config::{Config, KeyPaths};
pub use context::CryptoContext;
pub use enums::{InitOutcome, KeyDerivation, KeySource};
pub use error::{CoreError, Result};
pub use key_store::KeyStore;
