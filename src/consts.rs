// src/consts.rs
//! Shared constants: algorithm parameters and defaults

/// The only symmetric transform this crate implements
pub const AES_CBC_PKCS5_TRANSFORM: &str = "AES/CBC/PKCS5Padding";

/// Accepted as an alias: PKCS#5 and PKCS#7 padding are identical for AES
pub const AES_CBC_PKCS7_TRANSFORM: &str = "AES/CBC/PKCS7Padding";

/// AES block size, also the CBC IV length
pub const AES_BLOCK_SIZE: usize = 16;

/// Content key size in bytes (AES-256)
pub const CONTENT_KEY_LEN: usize = 32;

/// Default RSA modulus for freshly generated key pairs
pub const DEFAULT_RSA_MODULUS_BITS: usize = 2048;

/// Modulus used by older deployments; still loadable and generatable
pub const LEGACY_RSA_MODULUS_BITS: usize = 1024;

/// RSA public exponent (F4)
pub const RSA_PUBLIC_EXPONENT: u32 = 65_537;

/// PBKDF2 rounds for the Stretched derivation
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 65_536;

/// Stretched derivation takes its salt from the passphrase prefix
pub const STRETCHED_SALT_LEN: usize = 8;

/// Output length of the Stretched derivation unless configured otherwise
pub const DEFAULT_DERIVED_KEY_BITS: u32 = 256;

/// PBKDF2 rounds protecting the private key PEM
// Matches the OpenSSL PKCS#8 encryptor default, so keys stay readable by `openssl pkey`
pub const PEM_PBKDF2_ITERATIONS: u32 = 2048;

/// Salt length for the private key PEM encryption
pub const PEM_SALT_LEN: usize = 16;

pub const ENCRYPTED_PRIVATE_KEY_LABEL: &str = "ENCRYPTED PRIVATE KEY";

/// Default artifact file names inside the key directory
pub const PRIVATE_KEY_FILE: &str = "private_key.pem";
pub const PUBLIC_KEY_FILE: &str = "public_key.pem";
pub const CONTENT_KEY_FILE: &str = "content_key.bin";

/// Appended to the private key path while a key set is being generated
pub const BOOTSTRAP_LOCK_SUFFIX: &str = ".lock";

/// Environment variable holding the private key passphrase
pub const DEFAULT_PASSPHRASE_ENV: &str = "UDFC_KEY_PASSPHRASE";

/// Environment variable pointing at the TOML config file
pub const CONFIG_ENV: &str = "UDFC_CONFIG";

pub const DEFAULT_CONFIG_FILE: &str = "udf-crypt.toml";
