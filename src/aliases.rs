// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical secret types used throughout udf-crypt.

pub use secure_gate::{dynamic_alias, fixed_alias, SecureConversionsExt, SecureRandomExt};

// Fixed-size secrets
fixed_alias!(ContentKey32, 32); // 256-bit AES content key, stored RSA-wrapped

// Dynamic secrets
dynamic_alias!(CipherKey, Vec<u8>); // AES key bytes as handed to the cipher (16, 24 or 32)
dynamic_alias!(KeyPassphrase, String); // unlocks the private key PEM
