//! Security layer: anti-replay window and transport messages.
//!
//! - [`ReplayWindow`]: RFC 6479 sliding window over 64-bit nonces
//! - [`Transport`]: nonce-framed AEAD messages over two cipher directions
//! - [`CipherState`]: ChaCha20-Poly1305 cipher direction (`chachapoly` feature)

#[cfg(feature = "chachapoly")]
mod aead;
#[cfg(feature = "chachapoly")]
mod cipher_state;
#[cfg(feature = "chachapoly")]
mod rekey;
mod replay;
mod transport;

#[cfg(feature = "chachapoly")]
pub use aead::*;
#[cfg(feature = "chachapoly")]
pub use cipher_state::*;
#[cfg(feature = "chachapoly")]
pub use rekey::*;
pub use replay::*;
pub use transport::*;
