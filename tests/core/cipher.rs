// tests/core/cipher.rs
use std::borrow::Cow;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::Rng;
use udf_crypt::core::*;
use udf_crypt::error::CoreError;

const KEY: &[u8] = b"aesEncryptionKey";
const IV: &[u8] = b"encryptionIntVec";

#[test]
fn test_known_vector_hello2() {
    let encrypted = encrypt_string("hello2", KEY, IV).unwrap();
    assert_eq!(encrypted, "OM2GjeFCixFZW6x1K7Q75Q==");
    assert_eq!(decrypt_string(&encrypted, KEY, IV).unwrap(), "hello2");
}

#[test]
fn test_string_roundtrip_all_key_sizes() {
    let plaintext = "Sensitive row value, with ünïcödé";
    for key in [[7u8; 16].as_slice(), [7u8; 24].as_slice(), [7u8; 32].as_slice()] {
        let encrypted = encrypt_string(plaintext, key, IV).unwrap();
        assert!(!encrypted.contains('\n') && !encrypted.contains('\r'));
        assert_eq!(decrypt_string(&encrypted, key, IV).unwrap(), plaintext);
    }
}

#[test]
fn test_long_text_stays_single_line() {
    let plaintext = "x".repeat(4096);
    let encrypted = encrypt_string(&plaintext, KEY, IV).unwrap();
    assert!(!encrypted.contains('\n'));
    assert_eq!(decrypt_string(&encrypted, KEY, IV).unwrap(), plaintext);
}

#[test]
fn test_decrypt_tolerates_wrapped_base64() {
    let encrypted = encrypt_string(&"y".repeat(100), KEY, IV).unwrap();
    let wrapped = format!("{}\r\n{}", &encrypted[..40], &encrypted[40..]);
    assert_eq!(decrypt_string(&wrapped, KEY, IV).unwrap(), "y".repeat(100));
}

#[test]
fn test_invalid_key_length_is_rejected() {
    let result = encrypt_string("hello2", b"short", IV);
    assert!(matches!(result, Err(CoreError::InvalidKeyLength(5))));

    let result = decrypt_string("OM2GjeFCixFZW6x1K7Q75Q==", &[0u8; 17], IV);
    assert!(matches!(result, Err(CoreError::InvalidKeyLength(17))));
}

#[test]
fn test_invalid_iv_length_is_rejected() {
    let result = encrypt_string("hello2", KEY, b"tiny");
    assert!(matches!(result, Err(CoreError::InvalidIvLength(4))));
}

#[test]
fn test_wrong_key_fails_to_decrypt() {
    let encrypted = encrypt_string("hello2", KEY, IV).unwrap();
    let result = decrypt_string(&encrypted, b"anotherKey123456", IV);
    assert!(matches!(result, Err(CoreError::BadPadding)));
}

#[test]
fn test_non_base64_ciphertext() {
    let result = decrypt_string("not base64 at all!", KEY, IV);
    assert!(matches!(result, Err(CoreError::Base64(_))));
}

#[test]
fn test_truncated_ciphertext_is_bad_padding() {
    let encrypted = encrypt_bytes(b"sixteen byte msg!", KEY, IV).unwrap();
    let result = decrypt_bytes(&encrypted[..encrypted.len() - 3], KEY, IV);
    assert!(matches!(result, Err(CoreError::BadPadding)));
}

#[test]
fn test_binary_roundtrip_lengths() {
    let mut rng = rand::rng();
    for len in 1..=70usize {
        let mut plaintext = vec![0u8; len];
        rng.fill(plaintext.as_mut_slice());

        let encrypted = encrypt_bytes(&plaintext, KEY, IV).unwrap();
        assert_eq!(encrypted.len(), (len / 16 + 1) * 16);

        let decrypted = decrypt_bytes(&encrypted, KEY, IV).unwrap();
        assert_eq!(decrypted.as_ref(), plaintext.as_slice());
    }
}

#[test]
fn test_empty_binary_is_noop() {
    let empty: &[u8] = &[];
    let encrypted = encrypt_bytes(empty, KEY, IV).unwrap();
    assert!(matches!(encrypted, Cow::Borrowed(b) if b.is_empty()));

    let decrypted = decrypt_bytes(empty, KEY, IV).unwrap();
    assert!(matches!(decrypted, Cow::Borrowed(b) if b.is_empty()));

    // Key is not even looked at
    assert!(encrypt_bytes(empty, b"bad", b"bad").is_ok());
}

#[test]
fn test_same_key_and_iv_is_deterministic() {
    let a = encrypt_bytes(b"payload", KEY, IV).unwrap();
    let b = encrypt_bytes(b"payload", KEY, IV).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_single_byte_tamper_is_detected() {
    let mut rng = rand::rng();
    let ciphertext = encrypt_bytes(b"hello2", KEY, IV).unwrap().into_owned();
    let b64 = encrypt_string("hello2", KEY, IV).unwrap();
    assert_eq!(ciphertext.len(), 16);

    let trials = 200;
    let mut rejected = 0;
    for _ in 0..trials {
        let mut tampered = ciphertext.clone();
        let idx = rng.random_range(0..tampered.len());
        let flip: u8 = rng.random_range(1..=255);
        tampered[idx] ^= flip;

        let tampered_b64 = STANDARD.encode(&tampered);
        assert_ne!(tampered_b64, b64);

        if matches!(
            decrypt_string(&tampered_b64, KEY, IV),
            Err(CoreError::BadPadding)
        ) {
            rejected += 1;
        }
    }
    assert!(rejected >= trials * 9 / 10, "only {rejected}/{trials} rejected");
}

#[test]
fn test_seal_open_roundtrip_uses_fresh_iv() {
    let key = [9u8; 32];
    let a = seal(b"same plaintext", &key).unwrap();
    let b = seal(b"same plaintext", &key).unwrap();

    assert_ne!(a, b);
    assert_eq!(a.len(), 16 + 16);
    assert_eq!(open(&a, &key).unwrap(), b"same plaintext");
    assert_eq!(open(&b, &key).unwrap(), b"same plaintext");
}

#[test]
fn test_seal_string_roundtrip() {
    let key = [3u8; 32];
    let sealed = seal_string("hello2", &key).unwrap();
    assert_eq!(open_string(&sealed, &key).unwrap(), "hello2");
}

#[test]
fn test_open_rejects_short_input() {
    let result = open(&[0u8; 20], &[1u8; 32]);
    assert!(matches!(result, Err(CoreError::BadPadding)));
}
