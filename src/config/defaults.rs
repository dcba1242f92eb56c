// src/config/defaults.rs
use std::path::{Path, PathBuf};

use crate::config::app::{CipherSettings, KeyPaths, KeySettings};
use crate::consts::{
    AES_CBC_PKCS5_TRANSFORM, CONTENT_KEY_FILE, DEFAULT_DERIVED_KEY_BITS, DEFAULT_PASSPHRASE_ENV,
    DEFAULT_PBKDF2_ITERATIONS, DEFAULT_RSA_MODULUS_BITS, PRIVATE_KEY_FILE, PUBLIC_KEY_FILE,
};
use crate::enums::KeySource;

pub fn default_cipher() -> CipherSettings {
    CipherSettings {
        transform: AES_CBC_PKCS5_TRANSFORM.into(),
        key_source: KeySource::default(),
        key_size_bits: DEFAULT_DERIVED_KEY_BITS,
        pbkdf2_iterations: DEFAULT_PBKDF2_ITERATIONS,
    }
}

pub fn default_keys() -> KeySettings {
    KeySettings {
        rsa_modulus_bits: DEFAULT_RSA_MODULUS_BITS,
        passphrase_env: DEFAULT_PASSPHRASE_ENV.into(),
    }
}

pub fn default_key_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("udf-crypt").join("keys"))
        .unwrap_or_else(|| PathBuf::from("keys"))
}

pub fn default_paths() -> KeyPaths {
    key_paths_in(&default_key_dir())
}

pub fn key_paths_in(dir: &Path) -> KeyPaths {
    KeyPaths {
        private_key: dir.join(PRIVATE_KEY_FILE),
        public_key: dir.join(PUBLIC_KEY_FILE),
        content_key: dir.join(CONTENT_KEY_FILE),
    }
}
