//! Core traits for Noise transport messages.
//!
//! The transport layer never touches a concrete cipher. It drives each
//! direction through [`CipherDirection`], so the algorithm (and the handshake
//! that keyed it) stays outside this crate's core.

use super::error::CryptoError;

/// One direction of an authenticated cipher (a Noise `CipherState`).
///
/// Owns a single key and a 64-bit nonce counter. The counter is
/// auto-incremented on the sending side; the receiving side forces it with
/// [`set_nonce`](Self::set_nonce) before each decryption because transport
/// messages may arrive out of order.
///
/// # Requirements
///
/// - `encrypt_with_ad` appends a `TAG_SIZE`-byte tag and advances the nonce
/// - `decrypt_with_ad` MUST verify before revealing: on failure nothing is
///   written to `out` and the nonce is not advanced
/// - `rekey` replaces the key with a one-way derivation of itself
/// - `dispose` zeroizes key material and is idempotent
///
/// # Thread safety
///
/// Implementations are plain mutable state; callers synchronize externally.
pub trait CipherDirection {
    /// Size of the authentication tag appended to every ciphertext.
    const TAG_SIZE: usize;

    /// Whether a key is present.
    fn has_key(&self) -> bool;

    /// Current nonce counter (the nonce the next encryption will use).
    fn nonce(&self) -> u64;

    /// Force the nonce counter, used on the receiving side.
    fn set_nonce(&mut self, nonce: u64);

    /// Encrypt `plaintext` into `out`, returning the ciphertext+tag length.
    ///
    /// `ad` of `None` means no associated data.
    fn encrypt_with_ad(
        &mut self,
        ad: Option<&[u8]>,
        plaintext: &[u8],
        out: &mut [u8],
    ) -> Result<usize, CryptoError>;

    /// Decrypt `ciphertext` (tag included) into `out`, returning the plaintext length.
    fn decrypt_with_ad(
        &mut self,
        ad: Option<&[u8]>,
        ciphertext: &[u8],
        out: &mut [u8],
    ) -> Result<usize, CryptoError>;

    /// Replace the key with a one-way derivation of itself.
    fn rekey(&mut self) -> Result<(), CryptoError>;

    /// Zeroize key material. Calling it again is a no-op.
    fn dispose(&mut self);
}
