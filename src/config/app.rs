// src/config/app.rs
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::defaults::*;
use crate::consts::{
    AES_CBC_PKCS5_TRANSFORM, AES_CBC_PKCS7_TRANSFORM, BOOTSTRAP_LOCK_SUFFIX, CONFIG_ENV,
    DEFAULT_CONFIG_FILE, LEGACY_RSA_MODULUS_BITS,
};
use crate::enums::KeySource;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_cipher")]
    pub cipher: CipherSettings,
    #[serde(default = "default_keys")]
    pub keys: KeySettings,
    #[serde(default = "default_paths")]
    pub paths: KeyPaths,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CipherSettings {
    pub transform: String,
    pub key_source: KeySource,
    /// Output length of the stretched derivation
    pub key_size_bits: u32,
    pub pbkdf2_iterations: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeySettings {
    pub rsa_modulus_bits: usize,
    pub passphrase_env: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyPaths {
    pub private_key: PathBuf,
    pub public_key: PathBuf,
    pub content_key: PathBuf,
}

impl Default for CipherSettings {
    fn default() -> Self {
        default_cipher()
    }
}

impl Default for KeySettings {
    fn default() -> Self {
        default_keys()
    }
}

impl Default for KeyPaths {
    fn default() -> Self {
        default_paths()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cipher: default_cipher(),
            keys: default_keys(),
            paths: default_paths(),
        }
    }
}

impl KeyPaths {
    /// All three artifacts inside one directory, default file names
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        key_paths_in(dir.as_ref())
    }

    pub fn all(&self) -> [&Path; 3] {
        [&self.private_key, &self.public_key, &self.content_key]
    }

    /// Marker held while a key set is being generated
    pub fn lock_file(&self) -> PathBuf {
        let mut name = self.private_key.clone().into_os_string();
        name.push(BOOTSTRAP_LOCK_SUFFIX);
        PathBuf::from(name)
    }
}

impl Config {
    /// Read, parse and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| CoreError::storage(path, e))?;
        let conf = Self::from_toml(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(conf)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let conf: Config = toml::from_str(content)?;
        conf.validate()?;
        Ok(conf)
    }

    /// `$UDFC_CONFIG`, else `./udf-crypt.toml`, else built-in defaults
    pub fn from_env() -> Result<Self> {
        let config_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());

        if Path::new(&config_path).exists() {
            Self::load(&config_path)
        } else {
            warn!("{config_path} not found, using built-in defaults");
            let conf = Config::default();
            conf.validate()?;
            Ok(conf)
        }
    }

    pub fn validate(&self) -> Result<()> {
        let transform = self.cipher.transform.as_str();
        if !transform.eq_ignore_ascii_case(AES_CBC_PKCS5_TRANSFORM)
            && !transform.eq_ignore_ascii_case(AES_CBC_PKCS7_TRANSFORM)
        {
            return Err(CoreError::Configuration(format!(
                "unsupported cipher transform `{transform}`"
            )));
        }

        if !matches!(self.cipher.key_size_bits, 128 | 192 | 256) {
            return Err(CoreError::Configuration(format!(
                "key_size_bits must be 128, 192 or 256, got {}",
                self.cipher.key_size_bits
            )));
        }

        if self.cipher.pbkdf2_iterations == 0 {
            return Err(CoreError::Configuration(
                "pbkdf2_iterations must be non-zero".into(),
            ));
        }

        if self.keys.rsa_modulus_bits < LEGACY_RSA_MODULUS_BITS {
            return Err(CoreError::Configuration(format!(
                "rsa_modulus_bits must be at least {LEGACY_RSA_MODULUS_BITS}, got {}",
                self.keys.rsa_modulus_bits
            )));
        }

        if self.keys.passphrase_env.is_empty() {
            return Err(CoreError::Configuration("passphrase_env is empty".into()));
        }

        for path in self.paths.all() {
            if path.as_os_str().is_empty() {
                return Err(CoreError::Configuration("key artifact path is empty".into()));
            }
        }

        Ok(())
    }
}
