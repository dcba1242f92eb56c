// src/core/cipher.rs
//! AES-CBC / PKCS#5 cipher engine, no I/O and no key management
//!
//! Every call builds its own cipher context, so these functions are safe
//! to call from any number of threads. The explicit-IV functions never
//! generate, store or transmit IVs; callers own IV management. `seal` /
//! `open` are the variant that draws a random IV and carries it in front
//! of the ciphertext.

use std::borrow::Cow;

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::consts::AES_BLOCK_SIZE;
use crate::error::{CoreError, Result};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes192CbcEnc = cbc::Encryptor<Aes192>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes192CbcDec = cbc::Decryptor<Aes192>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

fn check_iv(iv: &[u8]) -> Result<()> {
    if iv.len() != AES_BLOCK_SIZE {
        return Err(CoreError::InvalidIvLength(iv.len()));
    }
    Ok(())
}

fn cbc_encrypt(plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    check_iv(iv)?;
    // Key length was matched, so new_from_slices cannot fail on it; the IV was checked above
    let invalid = |_| CoreError::InvalidKeyLength(key.len());
    let ciphertext = match key.len() {
        16 => Aes128CbcEnc::new_from_slices(key, iv)
            .map_err(invalid)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        24 => Aes192CbcEnc::new_from_slices(key, iv)
            .map_err(invalid)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        32 => Aes256CbcEnc::new_from_slices(key, iv)
            .map_err(invalid)?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        n => return Err(CoreError::InvalidKeyLength(n)),
    };
    Ok(ciphertext)
}

fn cbc_decrypt(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    check_iv(iv)?;
    let invalid = |_| CoreError::InvalidKeyLength(key.len());
    let plaintext = match key.len() {
        16 => Aes128CbcDec::new_from_slices(key, iv)
            .map_err(invalid)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        24 => Aes192CbcDec::new_from_slices(key, iv)
            .map_err(invalid)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        32 => Aes256CbcDec::new_from_slices(key, iv)
            .map_err(invalid)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        n => return Err(CoreError::InvalidKeyLength(n)),
    };
    // Also covers ciphertext that is not a whole number of blocks
    plaintext.map_err(|_| CoreError::BadPadding)
}

fn strip_line_breaks(s: &str) -> Cow<'_, str> {
    if s.contains(['\n', '\r']) {
        Cow::Owned(s.chars().filter(|c| *c != '\n' && *c != '\r').collect())
    } else {
        Cow::Borrowed(s)
    }
}

/// Encrypt UTF-8 text → single-line base64 ciphertext
pub fn encrypt_string(plaintext: &str, key: &[u8], iv: &[u8]) -> Result<String> {
    let ciphertext = cbc_encrypt(plaintext.as_bytes(), key, iv)?;
    Ok(strip_line_breaks(&STANDARD.encode(ciphertext)).into_owned())
}

/// Decrypt base64 ciphertext → UTF-8 text
///
/// A wrong key or IV usually fails the padding check; when it happens to
/// pass, the garbage is almost never valid UTF-8, which is reported the
/// same way.
pub fn decrypt_string(ciphertext_b64: &str, key: &[u8], iv: &[u8]) -> Result<String> {
    let ciphertext = STANDARD.decode(strip_line_breaks(ciphertext_b64).as_bytes())?;
    let plaintext = cbc_decrypt(&ciphertext, key, iv)?;
    String::from_utf8(plaintext).map_err(|_| CoreError::BadPadding)
}

/// Encrypt a binary payload; an empty payload is returned untouched
///
/// The empty check comes first, so an empty payload passes even with an
/// unusable key.
pub fn encrypt_bytes<'a>(plaintext: &'a [u8], key: &[u8], iv: &[u8]) -> Result<Cow<'a, [u8]>> {
    if plaintext.is_empty() {
        return Ok(Cow::Borrowed(plaintext));
    }
    cbc_encrypt(plaintext, key, iv).map(Cow::Owned)
}

/// Decrypt a binary payload; an empty payload is returned untouched
pub fn decrypt_bytes<'a>(ciphertext: &'a [u8], key: &[u8], iv: &[u8]) -> Result<Cow<'a, [u8]>> {
    if ciphertext.is_empty() {
        return Ok(Cow::Borrowed(ciphertext));
    }
    cbc_decrypt(ciphertext, key, iv).map(Cow::Owned)
}

/// Encrypt under a fresh random IV → `iv || ciphertext`
pub fn seal(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let iv: [u8; AES_BLOCK_SIZE] = rand::random();
    let ciphertext = cbc_encrypt(plaintext, key, &iv)?;

    let mut out = Vec::with_capacity(AES_BLOCK_SIZE + ciphertext.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Reverse of [`seal`]
pub fn open(sealed: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    // The shortest sealed message is one IV plus one padded block
    if sealed.len() < 2 * AES_BLOCK_SIZE {
        return Err(CoreError::BadPadding);
    }
    let (iv, ciphertext) = sealed.split_at(AES_BLOCK_SIZE);
    cbc_decrypt(ciphertext, key, iv)
}

/// [`seal`] for text, base64 transport encoding
pub fn seal_string(plaintext: &str, key: &[u8]) -> Result<String> {
    Ok(STANDARD.encode(seal(plaintext.as_bytes(), key)?))
}

/// Reverse of [`seal_string`]
pub fn open_string(sealed_b64: &str, key: &[u8]) -> Result<String> {
    let sealed = STANDARD.decode(strip_line_breaks(sealed_b64).as_bytes())?;
    String::from_utf8(open(&sealed, key)?).map_err(|_| CoreError::BadPadding)
}
