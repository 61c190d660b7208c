//! One-way key rotation for forward secrecy
//!
//! Noise `REKEY(k)`: encrypt 32 zero bytes under `k` with the reserved nonce
//! `2^64 - 1` and empty associated data, and keep the first 32 bytes of the
//! ciphertext (the tag is discarded). Knowing the new key reveals nothing
//! about the old one.

use zeroize::Zeroize;

use crate::core::{CryptoError, AEAD_TAG_SIZE, MAX_NONCE, SESSION_KEY_SIZE};

use super::aead::{encrypt, SessionKey};

/// Derive the next key from `key`.
pub fn derive_rekey_key(key: &SessionKey) -> Result<SessionKey, CryptoError> {
    let zeros = [0u8; SESSION_KEY_SIZE];
    let mut output = [0u8; SESSION_KEY_SIZE + AEAD_TAG_SIZE];
    encrypt(key, MAX_NONCE, &[], &zeros, &mut output)?;

    let mut next = [0u8; SESSION_KEY_SIZE];
    next.copy_from_slice(&output[..SESSION_KEY_SIZE]);
    output.zeroize();

    Ok(SessionKey::from_bytes(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::aead::decrypt;

    #[test]
    fn test_rekey_is_deterministic() {
        let key = SessionKey::from_bytes([0x42; SESSION_KEY_SIZE]);

        let a = derive_rekey_key(&key).unwrap();
        let b = derive_rekey_key(&key).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_ne!(a.as_bytes(), key.as_bytes());
    }

    #[test]
    fn test_rekey_chain_never_repeats() {
        let mut key = SessionKey::from_bytes([0x01; SESSION_KEY_SIZE]);
        let mut seen = vec![*key.as_bytes()];

        for _ in 0..16 {
            key = derive_rekey_key(&key).unwrap();
            assert!(!seen.contains(key.as_bytes()));
            seen.push(*key.as_bytes());
        }
    }

    #[test]
    fn test_rekey_matches_keystream_at_max_nonce() {
        let key = SessionKey::from_bytes([0x07; SESSION_KEY_SIZE]);
        let next = derive_rekey_key(&key).unwrap();

        // Encrypting zeros yields the raw keystream block at the reserved nonce
        let mut output = [0u8; SESSION_KEY_SIZE + AEAD_TAG_SIZE];
        encrypt(&key, MAX_NONCE, &[], &[0u8; SESSION_KEY_SIZE], &mut output).unwrap();
        assert_eq!(&output[..SESSION_KEY_SIZE], next.as_bytes());

        let mut plain = [0xFFu8; SESSION_KEY_SIZE];
        decrypt(&key, MAX_NONCE, &[], &output, &mut plain).unwrap();
        assert_eq!(plain, [0u8; SESSION_KEY_SIZE]);
    }
}
