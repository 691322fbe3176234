//! Cipher engine for note text encryption at rest.
//!
//! Plaintext is encrypted with AES-256-CBC (PKCS#7 padding) and stored as a
//! self-describing token:
//!
//! ```text
//! <ivHex>:<ciphertextHex>
//! ```
//!
//! A fresh random IV is generated per encryption call and carried in the
//! token, so equal plaintexts produce different tokens. PKCS#7 unpadding
//! acts as an implicit integrity check during decryption: a wrong key,
//! a cross-process token, or corrupted ciphertext is rejected instead of
//! yielding garbage.

use crate::error::Error;
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::{rngs::OsRng, RngCore};
use secrecy::{ExposeSecret, Secret};
use zeroize::Zeroize;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// IV size for AES-CBC (one 128-bit block).
pub const IV_SIZE: usize = 16;

/// Key size for AES-256 (256 bits).
pub const KEY_SIZE: usize = 32;

/// Separator between the IV and ciphertext segments of a token.
const TOKEN_SEPARATOR: char = ':';

/// Symmetric cipher engine for note text.
///
/// The key is fixed for the lifetime of the engine. Construct one engine at
/// process start and share it by handle; all methods take `&self` and the
/// engine holds no mutable state, so it is safe for concurrent use without
/// locking.
///
/// [`CipherEngine::new`] generates a random key, which means tokens are only
/// decryptable within the process that created them. Use
/// [`CipherEngine::from_key`] or [`CipherEngine::from_hex_key`] with
/// externalized key material when ciphertext must survive restarts.
///
/// # Example
///
/// ```
/// use sirnot::cipher::CipherEngine;
///
/// let engine = CipherEngine::new();
/// let token = engine.encrypt("a short secret");
/// assert_eq!(engine.decrypt(&token).unwrap(), "a short secret");
/// ```
pub struct CipherEngine {
    key: Secret<[u8; KEY_SIZE]>,
}

impl CipherEngine {
    /// Creates an engine with a freshly generated random key.
    ///
    /// The key is never persisted; tokens produced by this engine are
    /// decryptable only for the lifetime of the engine's key.
    #[must_use]
    pub fn new() -> Self {
        let mut key = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut key);
        Self::from_key(key)
    }

    /// Creates an engine from externalized key material.
    #[must_use]
    pub fn from_key(key: [u8; KEY_SIZE]) -> Self {
        Self { key: Secret::new(key) }
    }

    /// Creates an engine from a hex-encoded 256-bit key, as produced by the
    /// CLI `keygen` command.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the input is not valid hex or does
    /// not decode to exactly [`KEY_SIZE`] bytes.
    pub fn from_hex_key(hex_key: &str) -> Result<Self, Error> {
        let mut bytes = hex::decode(hex_key)
            .map_err(|e| Error::InvalidKey(format!("invalid hex: {e}")))?;

        if bytes.len() != KEY_SIZE {
            let got = bytes.len();
            bytes.zeroize();
            return Err(Error::InvalidKey(format!(
                "key must be {KEY_SIZE} bytes, got {got}"
            )));
        }

        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&bytes);
        bytes.zeroize();
        Ok(Self::from_key(key))
    }

    /// Encrypts a UTF-8 string (including the empty string) into an
    /// `ivHex:ciphertextHex` token.
    ///
    /// A fresh random IV is drawn per call, so repeated encryptions of the
    /// same plaintext yield different tokens.
    #[must_use]
    pub fn encrypt(&self, plaintext: &str) -> String {
        let mut iv = [0u8; IV_SIZE];
        OsRng.fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new(self.key.expose_secret().into(), (&iv).into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        format!(
            "{}{TOKEN_SEPARATOR}{}",
            hex::encode(iv),
            hex::encode(ciphertext)
        )
    }

    /// Decrypts an `ivHex:ciphertextHex` token back to the plaintext.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedToken`] if the separator is missing, either
    /// segment is not valid hex, or the IV segment is not [`IV_SIZE`] bytes.
    ///
    /// Returns [`Error::DecryptionFailed`] if PKCS#7 unpadding rejects the
    /// result or the decrypted bytes are not valid UTF-8 (token produced
    /// under a different key, or corrupted ciphertext).
    pub fn decrypt(&self, token: &str) -> Result<String, Error> {
        let (iv_hex, ciphertext_hex) = token
            .split_once(TOKEN_SEPARATOR)
            .ok_or_else(|| Error::MalformedToken("missing ':' separator".to_string()))?;

        let iv = hex::decode(iv_hex)
            .map_err(|e| Error::MalformedToken(format!("invalid IV hex: {e}")))?;
        let iv: [u8; IV_SIZE] = iv
            .try_into()
            .map_err(|bad: Vec<u8>| {
                Error::MalformedToken(format!(
                    "IV must be {IV_SIZE} bytes, got {}",
                    bad.len()
                ))
            })?;

        let ciphertext = hex::decode(ciphertext_hex)
            .map_err(|e| Error::MalformedToken(format!("invalid ciphertext hex: {e}")))?;

        let plaintext = Aes256CbcDec::new(self.key.expose_secret().into(), (&iv).into())
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| Error::DecryptionFailed("padding check failed".to_string()))?;

        String::from_utf8(plaintext)
            .map_err(|_| Error::DecryptionFailed("plaintext is not valid UTF-8".to_string()))
    }
}

impl Default for CipherEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_round_trip() {
        let engine = CipherEngine::new();

        let token = engine.encrypt("a short secret");
        let decrypted = engine.decrypt(&token).expect("Decryption failed");

        assert_eq!(decrypted, "a short secret");
    }

    #[test]
    fn test_round_trip_empty_string() {
        let engine = CipherEngine::new();

        let token = engine.encrypt("");
        let decrypted = engine.decrypt(&token).expect("Decryption failed");

        assert_eq!(decrypted, "");
    }

    #[test]
    fn test_round_trip_embedded_separator() {
        let engine = CipherEngine::new();

        let token = engine.encrypt("left:right:more");
        let decrypted = engine.decrypt(&token).expect("Decryption failed");

        assert_eq!(decrypted, "left:right:more");
    }

    #[test]
    fn test_token_shape() {
        let engine = CipherEngine::new();

        let token = engine.encrypt("some note");
        let (iv_hex, ciphertext_hex) = token.split_once(':').expect("Missing separator");

        let iv = hex::decode(iv_hex).expect("IV segment is not hex");
        assert_eq!(iv.len(), IV_SIZE);

        let ciphertext = hex::decode(ciphertext_hex).expect("Ciphertext segment is not hex");
        assert!(!ciphertext.is_empty());
    }

    #[test]
    fn test_fresh_iv_per_call() {
        let engine = CipherEngine::new();

        let token1 = engine.encrypt("same plaintext");
        let token2 = engine.encrypt("same plaintext");

        // Per-message IVs: equal plaintexts must not produce equal tokens
        assert_ne!(token1, token2);

        assert_eq!(engine.decrypt(&token1).unwrap(), "same plaintext");
        assert_eq!(engine.decrypt(&token2).unwrap(), "same plaintext");
    }

    #[test]
    fn test_missing_separator_is_malformed() {
        let engine = CipherEngine::new();

        let result = engine.decrypt("deadbeef");
        assert!(matches!(result, Err(Error::MalformedToken(_))));
    }

    #[test]
    fn test_non_hex_segments_are_malformed() {
        let engine = CipherEngine::new();

        let result = engine.decrypt("not-hex:deadbeef");
        assert!(matches!(result, Err(Error::MalformedToken(_))));

        let result = engine.decrypt("00112233445566778899aabbccddeeff:zzzz");
        assert!(matches!(result, Err(Error::MalformedToken(_))));
    }

    #[test]
    fn test_short_iv_is_malformed() {
        let engine = CipherEngine::new();

        let result = engine.decrypt("0011:deadbeef");
        assert!(matches!(result, Err(Error::MalformedToken(_))));
    }

    #[test]
    fn test_wrong_key_fails() {
        let engine1 = CipherEngine::new();
        let engine2 = CipherEngine::new();

        let token = engine1.encrypt("a short secret");
        let result = engine2.decrypt(&token);

        assert!(result.is_err());
    }

    #[test]
    fn test_corrupted_ciphertext_fails() {
        let engine = CipherEngine::new();

        let mut token = engine.encrypt("a short secret");
        // Flip the final hex digit of the last ciphertext block
        let last = token.pop().expect("empty token");
        token.push(if last == '0' { '1' } else { '0' });

        let result = engine.decrypt(&token);
        assert!(result.is_err());
    }

    #[test]
    fn test_shared_key_across_engines() {
        let mut key = [0u8; KEY_SIZE];
        key[..4].copy_from_slice(&[1, 2, 3, 4]);

        let engine1 = CipherEngine::from_key(key);
        let engine2 = CipherEngine::from_key(key);

        let token = engine1.encrypt("survives the restart");
        let decrypted = engine2.decrypt(&token).expect("Decryption failed");

        assert_eq!(decrypted, "survives the restart");
    }

    #[test]
    fn test_from_hex_key() {
        let hex_key = "00".repeat(KEY_SIZE);
        let engine = CipherEngine::from_hex_key(&hex_key).expect("Key parsing failed");

        let token = engine.encrypt("note");
        assert_eq!(engine.decrypt(&token).unwrap(), "note");
    }

    #[test]
    fn test_from_hex_key_rejects_bad_material() {
        assert!(matches!(
            CipherEngine::from_hex_key("zz"),
            Err(Error::InvalidKey(_))
        ));
        assert!(matches!(
            CipherEngine::from_hex_key("deadbeef"),
            Err(Error::InvalidKey(_))
        ));
    }

    proptest! {
        #[test]
        fn round_trip_arbitrary_strings(plaintext in ".*") {
            let engine = CipherEngine::new();
            let token = engine.encrypt(&plaintext);
            prop_assert_eq!(engine.decrypt(&token).unwrap(), plaintext);
        }
    }
}
