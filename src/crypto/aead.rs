//! ChaCha20-Poly1305 AEAD (Noise `ChaChaPoly` cipher functions)
//!
//! The 96-bit AEAD nonce is built from the 64-bit message counter:
//! ```text
//! [ zeros (4) | counter (8, LE64) ]
//! ```
//! Ciphertexts carry the 16-byte Poly1305 tag at the end.

use chacha20poly1305::{
    aead::{AeadInPlace, KeyInit},
    ChaCha20Poly1305, Nonce, Tag,
};
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core::{CryptoError, AEAD_NONCE_SIZE, AEAD_TAG_SIZE, SESSION_KEY_SIZE};

/// A symmetric key for one cipher direction.
///
/// Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionKey {
    key: [u8; SESSION_KEY_SIZE],
}

impl SessionKey {
    /// Create a session key from bytes.
    pub fn from_bytes(key: [u8; SESSION_KEY_SIZE]) -> Self {
        Self { key }
    }

    /// Generate a random session key from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut key = [0u8; SESSION_KEY_SIZE];
        OsRng.fill_bytes(&mut key);
        Self { key }
    }

    /// Get the raw key bytes.
    ///
    /// # Security
    /// Handle with care - this exposes sensitive key material.
    pub fn as_bytes(&self) -> &[u8; SESSION_KEY_SIZE] {
        &self.key
    }

    fn cipher(&self) -> ChaCha20Poly1305 {
        ChaCha20Poly1305::new((&self.key).into())
    }
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionKey(..)")
    }
}

/// Construct the 12-byte AEAD nonce for a message counter.
pub fn construct_nonce(counter: u64) -> [u8; AEAD_NONCE_SIZE] {
    let mut nonce = [0u8; AEAD_NONCE_SIZE];
    nonce[4..].copy_from_slice(&counter.to_le_bytes());
    nonce
}

/// Encrypt `plaintext` into `out`, appending the tag.
///
/// Returns `plaintext.len() + AEAD_TAG_SIZE`.
pub fn encrypt(
    key: &SessionKey,
    counter: u64,
    aad: &[u8],
    plaintext: &[u8],
    out: &mut [u8],
) -> Result<usize, CryptoError> {
    let len = plaintext.len() + AEAD_TAG_SIZE;
    if out.len() < len {
        return Err(CryptoError::BufferTooSmall {
            needed: len,
            available: out.len(),
        });
    }

    let nonce = construct_nonce(counter);
    let (body, rest) = out.split_at_mut(plaintext.len());
    body.copy_from_slice(plaintext);

    let tag = key
        .cipher()
        .encrypt_in_place_detached(Nonce::from_slice(&nonce), aad, body)
        .map_err(|_| CryptoError::EncryptionFailed)?;
    rest[..AEAD_TAG_SIZE].copy_from_slice(&tag);

    Ok(len)
}

/// Decrypt `ciphertext` (tag included) into `out`.
///
/// The tag is verified before any plaintext is produced; on failure the
/// touched region of `out` is wiped.
pub fn decrypt(
    key: &SessionKey,
    counter: u64,
    aad: &[u8],
    ciphertext: &[u8],
    out: &mut [u8],
) -> Result<usize, CryptoError> {
    if ciphertext.len() < AEAD_TAG_SIZE {
        return Err(CryptoError::DecryptionFailed);
    }

    let len = ciphertext.len() - AEAD_TAG_SIZE;
    if out.len() < len {
        return Err(CryptoError::BufferTooSmall {
            needed: len,
            available: out.len(),
        });
    }

    let nonce = construct_nonce(counter);
    let (body, tag) = ciphertext.split_at(len);
    let buffer = &mut out[..len];
    buffer.copy_from_slice(body);

    match key.cipher().decrypt_in_place_detached(
        Nonce::from_slice(&nonce),
        aad,
        buffer,
        Tag::from_slice(tag),
    ) {
        Ok(()) => Ok(len),
        Err(_) => {
            buffer.zeroize();
            Err(CryptoError::DecryptionFailed)
        }
    }
}
