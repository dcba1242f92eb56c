// tests/core/derive.rs
use udf_crypt::consts::DEFAULT_PBKDF2_ITERATIONS;
use udf_crypt::core::{encrypt_string, StretchParams};
use udf_crypt::error::CoreError;
use udf_crypt::KeyDerivation;

const PARAMS: StretchParams = StretchParams {
    iterations: DEFAULT_PBKDF2_ITERATIONS,
    key_size_bits: 256,
};
const IV: &[u8] = b"encryptionIntVec";

#[test]
fn test_raw_is_passphrase_bytes() {
    let key = KeyDerivation::Raw.derive("aesEncryptionKey", PARAMS).unwrap();
    assert_eq!(key.expose_secret().as_slice(), b"aesEncryptionKey");
}

#[test]
fn test_raw_with_wrong_length_fails_at_cipher() {
    let key = KeyDerivation::Raw.derive("too-short", PARAMS).unwrap();
    let result = encrypt_string("hello2", key.expose_secret(), IV);
    assert!(matches!(result, Err(CoreError::InvalidKeyLength(9))));
}

#[test]
fn test_digest_known_vector() {
    let key = KeyDerivation::Digest.derive("aesEncryptionKey", PARAMS).unwrap();
    assert_eq!(
        hex::encode(key.expose_secret()),
        "c91d48f2057d3b7d2eba35b120b312058fcdbf729922cadf8cf4effd0d12c9d6"
    );
    assert_eq!(
        encrypt_string("hello2", key.expose_secret(), IV).unwrap(),
        "VR5CX+w94RwrsZfw5vmzTg=="
    );
}

#[test]
fn test_digest_is_deterministic_and_32_bytes() {
    let a = KeyDerivation::Digest.derive("x", PARAMS).unwrap();
    let b = KeyDerivation::Digest.derive("x", PARAMS).unwrap();
    assert_eq!(a.expose_secret().len(), 32);
    assert_eq!(a.expose_secret(), b.expose_secret());

    let c = KeyDerivation::Digest.derive("y", PARAMS).unwrap();
    assert_ne!(a.expose_secret(), c.expose_secret());
}

#[test]
fn test_stretched_known_vector() {
    let key = KeyDerivation::Stretched
        .derive("aesEncryptionKey", PARAMS)
        .unwrap();
    assert_eq!(
        hex::encode(key.expose_secret()),
        "c28b0772ac2a27b9513bff3c259c9d08e32ea9d2c312b3fffa22a3b7b100e235"
    );
    assert_eq!(
        encrypt_string("hello2", key.expose_secret(), IV).unwrap(),
        "XU+BaRdwH8eHvfbuwSzhQQ=="
    );
}

#[test]
fn test_stretched_is_deterministic() {
    let params = StretchParams {
        iterations: 1000,
        key_size_bits: 256,
    };
    let a = KeyDerivation::Stretched.derive("passphrase-1", params).unwrap();
    let b = KeyDerivation::Stretched.derive("passphrase-1", params).unwrap();
    assert_eq!(a.expose_secret(), b.expose_secret());
}

#[test]
fn test_stretched_honours_key_size() {
    let params = StretchParams {
        iterations: 1000,
        key_size_bits: 128,
    };
    let key = KeyDerivation::Stretched.derive("passphrase-1", params).unwrap();
    assert_eq!(key.expose_secret().len(), 16);
}

#[test]
fn test_stretched_rejects_short_passphrase() {
    let result = KeyDerivation::Stretched.derive("seven77", PARAMS);
    assert!(matches!(
        result,
        Err(CoreError::PassphraseTooShort { len: 7, min: 8 })
    ));
}
