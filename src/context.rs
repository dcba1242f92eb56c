// src/context.rs
//! `CryptoContext`, the handle the query host holds
//!
//! Built once at startup, shared by reference (or `Arc`) with every
//! function invocation. Construction bootstraps the key store and fails
//! hard: a host without valid keys must not serve encryption functions.

use std::fmt;

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::aliases::{CipherKey, ContentKey32, KeyPassphrase};
use crate::config::Config;
use crate::core::{self, public_key_fingerprint, KeyMaterialGenerator, StretchParams};
use crate::enums::InitOutcome;
use crate::error::{CoreError, Result};
use crate::key_store::KeyStore;

pub struct CryptoContext {
    config: Config,
    store: KeyStore,
    outcome: InitOutcome,
    // initialize-once barrier for the unwrapped content key
    content_key: OnceCell<ContentKey32>,
}

impl fmt::Debug for CryptoContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoContext")
            .field("key_source", &self.config.cipher.key_source)
            .field("paths", &self.config.paths)
            .field("outcome", &self.outcome)
            .field("content_key_loaded", &self.content_key.get().is_some())
            .finish()
    }
}

impl CryptoContext {
    /// Validate config, then bootstrap (or find) the key artifacts
    pub fn new(config: Config, passphrase: KeyPassphrase) -> Result<Self> {
        config.validate()?;
        if passphrase.expose_secret().is_empty() {
            return Err(CoreError::Configuration(
                "private key passphrase is empty".into(),
            ));
        }

        let generator = KeyMaterialGenerator::new(config.keys.rsa_modulus_bits)?;
        let store = KeyStore::new(config.paths.clone(), passphrase, generator);
        let outcome = store.initialize()?;

        info!(
            ?outcome,
            key_source = ?config.cipher.key_source,
            "crypto context ready"
        );

        Ok(Self {
            config,
            store,
            outcome,
            content_key: OnceCell::new(),
        })
    }

    /// Config from `$UDFC_CONFIG`, passphrase from the configured env var
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        let var = &config.keys.passphrase_env;
        let passphrase = std::env::var(var).map_err(|_| {
            CoreError::Configuration(format!("private key passphrase not set in ${var}"))
        })?;
        Self::new(config, KeyPassphrase::new(passphrase))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn key_store(&self) -> &KeyStore {
        &self.store
    }

    pub fn init_outcome(&self) -> InitOutcome {
        self.outcome
    }

    /// Unwrapped content key, loaded from disk on first use
    pub fn content_key(&self) -> Result<&ContentKey32> {
        self.content_key.get_or_try_init(|| {
            let private_key = self.store.load_private_key()?;
            let key = self.store.load_content_key(&private_key)?;
            debug!("content key loaded");
            Ok(key)
        })
    }

    pub fn fingerprint(&self) -> Result<String> {
        public_key_fingerprint(&self.store.load_public_key()?)
    }

    /// Key bytes for the explicit function surface, per configured key source
    pub fn resolve_key(&self, key: &str) -> Result<CipherKey> {
        let cipher = &self.config.cipher;
        match cipher.key_source.derivation() {
            Some(derivation) => derivation.derive(
                key,
                StretchParams {
                    iterations: cipher.pbkdf2_iterations,
                    key_size_bits: cipher.key_size_bits,
                },
            ),
            None => Ok(CipherKey::new(self.content_key()?.expose_secret().to_vec())),
        }
    }

    pub fn encrypt_string(&self, text: &str, key: &str, iv: &str) -> Result<String> {
        let key = self.resolve_key(key)?;
        core::encrypt_string(text, key.expose_secret(), iv.as_bytes())
    }

    pub fn decrypt_string(&self, text: &str, key: &str, iv: &str) -> Result<String> {
        let key = self.resolve_key(key)?;
        core::decrypt_string(text, key.expose_secret(), iv.as_bytes())
    }

    /// Empty input comes back empty without touching the key
    pub fn encrypt_binary(&self, bytes: &[u8], key: &str, iv: &str) -> Result<Vec<u8>> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        let key = self.resolve_key(key)?;
        core::encrypt_bytes(bytes, key.expose_secret(), iv.as_bytes()).map(|c| c.into_owned())
    }

    pub fn decrypt_binary(&self, bytes: &[u8], key: &str, iv: &str) -> Result<Vec<u8>> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        let key = self.resolve_key(key)?;
        core::decrypt_bytes(bytes, key.expose_secret(), iv.as_bytes()).map(|c| c.into_owned())
    }

    // Content-key overloads: no caller key or IV, random IV carried in front

    pub fn seal_string(&self, text: &str) -> Result<String> {
        core::seal_string(text, self.content_key()?.expose_secret())
    }

    pub fn open_string(&self, text: &str) -> Result<String> {
        core::open_string(text, self.content_key()?.expose_secret())
    }

    pub fn seal_binary(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        core::seal(bytes, self.content_key()?.expose_secret())
    }

    pub fn open_binary(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        core::open(bytes, self.content_key()?.expose_secret())
    }
}
