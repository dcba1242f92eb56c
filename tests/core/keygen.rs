// tests/core/keygen.rs
use rsa::traits::PublicKeyParts;
use rsa::BigUint;
use udf_crypt::consts::{DEFAULT_RSA_MODULUS_BITS, LEGACY_RSA_MODULUS_BITS};
use udf_crypt::core::{generate_content_key, KeyMaterialGenerator};
use udf_crypt::error::CoreError;

#[test]
fn test_generate_content_key_is_random_and_32_bytes() {
    let key1 = generate_content_key();
    let key2 = generate_content_key();
    assert_eq!(key1.expose_secret().len(), 32);
    assert_ne!(
        key1.expose_secret().as_slice(),
        key2.expose_secret().as_slice()
    );
}

#[test]
fn test_default_generator_uses_2048_bits() {
    assert_eq!(
        KeyMaterialGenerator::default().modulus_bits(),
        DEFAULT_RSA_MODULUS_BITS
    );
}

#[test]
fn test_generator_rejects_tiny_modulus() {
    let result = KeyMaterialGenerator::new(512);
    assert!(matches!(result, Err(CoreError::Configuration(_))));
}

#[test]
fn test_generate_yields_fresh_unrelated_material() {
    let generator = KeyMaterialGenerator::new(LEGACY_RSA_MODULUS_BITS).unwrap();
    let a = generator.generate().unwrap();
    let b = generator.generate().unwrap();

    assert_eq!(a.public_key.n().bits(), LEGACY_RSA_MODULUS_BITS);
    assert_eq!(a.public_key.e(), &BigUint::from(65_537u32));
    assert_eq!(a.public_key, rsa::RsaPublicKey::from(&a.private_key));

    assert_ne!(a.public_key, b.public_key);
    assert_ne!(
        a.content_key.expose_secret().as_slice(),
        b.content_key.expose_secret().as_slice()
    );
}
