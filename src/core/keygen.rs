// src/core/keygen.rs
//! Fresh key material: RSA key pair + AES content key
//!
//! Pure value production. Nothing here touches the filesystem; the key
//! store decides what gets persisted.

use rsa::rand_core::OsRng;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use tracing::{debug, warn};

use crate::aliases::ContentKey32;
use crate::consts::{DEFAULT_RSA_MODULUS_BITS, LEGACY_RSA_MODULUS_BITS, RSA_PUBLIC_EXPONENT};
use crate::error::{CoreError, Result};

/// One freshly generated key set; the parts are unrelated to any earlier set
pub struct KeyMaterial {
    pub private_key: RsaPrivateKey,
    pub public_key: RsaPublicKey,
    pub content_key: ContentKey32,
}

/// Generator handle, built once per context and passed by reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMaterialGenerator {
    modulus_bits: usize,
}

impl Default for KeyMaterialGenerator {
    fn default() -> Self {
        Self {
            modulus_bits: DEFAULT_RSA_MODULUS_BITS,
        }
    }
}

impl KeyMaterialGenerator {
    pub fn new(modulus_bits: usize) -> Result<Self> {
        if modulus_bits < LEGACY_RSA_MODULUS_BITS {
            return Err(CoreError::Configuration(format!(
                "RSA modulus of {modulus_bits} bits is below the {LEGACY_RSA_MODULUS_BITS}-bit minimum"
            )));
        }
        if modulus_bits < DEFAULT_RSA_MODULUS_BITS {
            warn!(modulus_bits, "generating legacy-size RSA keys");
        }
        Ok(Self { modulus_bits })
    }

    pub fn modulus_bits(&self) -> usize {
        self.modulus_bits
    }

    /// RSA key pair with e = 65537 plus an independent 256-bit content key
    pub fn generate(&self) -> Result<KeyMaterial> {
        let (private_key, public_key) = self.generate_key_pair()?;
        Ok(KeyMaterial {
            private_key,
            public_key,
            content_key: generate_content_key(),
        })
    }

    pub fn generate_key_pair(&self) -> Result<(RsaPrivateKey, RsaPublicKey)> {
        let exponent = BigUint::from(RSA_PUBLIC_EXPONENT);
        let private_key = RsaPrivateKey::new_with_exp(&mut OsRng, self.modulus_bits, &exponent)
            .map_err(|e| CoreError::KeyGeneration(e.to_string()))?;
        let public_key = RsaPublicKey::from(&private_key);
        debug!(modulus_bits = self.modulus_bits, "generated RSA key pair");
        Ok((private_key, public_key))
    }
}

/// Generate a new random 256-bit content key
#[inline]
pub fn generate_content_key() -> ContentKey32 {
    ContentKey32::new(rand::random())
}
