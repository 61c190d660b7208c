//! Concrete cipher direction: a Noise `CipherState` over ChaCha20-Poly1305.

use crate::core::{CipherDirection, CryptoError, AEAD_TAG_SIZE, MAX_NONCE, SESSION_KEY_SIZE};

use super::{
    aead::{decrypt, encrypt, SessionKey},
    rekey::derive_rekey_key,
};

/// One direction of a transport: a key plus a 64-bit nonce counter.
///
/// The nonce advances only after a successful encryption or decryption.
/// `2^64 - 1` is reserved; reaching it yields [`CryptoError::NonceExhausted`].
#[derive(Debug, Default)]
pub struct CipherState {
    /// Current key, `None` before keying and after disposal
    key: Option<SessionKey>,
    /// Next nonce
    nonce: u64,
}

impl CipherState {
    /// Create a keyed cipher state with nonce 0.
    pub fn new(key: SessionKey) -> Self {
        Self {
            key: Some(key),
            nonce: 0,
        }
    }

    /// Create a cipher state from raw key bytes.
    pub fn from_bytes(key: [u8; SESSION_KEY_SIZE]) -> Self {
        Self::new(SessionKey::from_bytes(key))
    }

    fn key(&self) -> Result<&SessionKey, CryptoError> {
        self.key.as_ref().ok_or(CryptoError::MissingKey)
    }

    fn usable_nonce(&self) -> Result<u64, CryptoError> {
        if self.nonce == MAX_NONCE {
            return Err(CryptoError::NonceExhausted);
        }
        Ok(self.nonce)
    }
}

impl CipherDirection for CipherState {
    const TAG_SIZE: usize = AEAD_TAG_SIZE;

    fn has_key(&self) -> bool {
        self.key.is_some()
    }

    fn nonce(&self) -> u64 {
        self.nonce
    }

    fn set_nonce(&mut self, nonce: u64) {
        self.nonce = nonce;
    }

    fn encrypt_with_ad(
        &mut self,
        ad: Option<&[u8]>,
        plaintext: &[u8],
        out: &mut [u8],
    ) -> Result<usize, CryptoError> {
        let nonce = self.usable_nonce()?;
        let len = encrypt(self.key()?, nonce, ad.unwrap_or_default(), plaintext, out)?;
        self.nonce += 1;
        Ok(len)
    }

    fn decrypt_with_ad(
        &mut self,
        ad: Option<&[u8]>,
        ciphertext: &[u8],
        out: &mut [u8],
    ) -> Result<usize, CryptoError> {
        let nonce = self.usable_nonce()?;
        let len = decrypt(self.key()?, nonce, ad.unwrap_or_default(), ciphertext, out)?;
        self.nonce += 1;
        Ok(len)
    }

    fn rekey(&mut self) -> Result<(), CryptoError> {
        let next = derive_rekey_key(self.key()?)?;
        // Old key is zeroized as it drops
        self.key = Some(next);
        tracing::debug!(nonce = self.nonce, "cipher direction rekeyed");
        Ok(())
    }

    fn dispose(&mut self) {
        if self.key.take().is_some() {
            tracing::trace!("cipher direction disposed");
        }
    }
}
