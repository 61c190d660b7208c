//! # noise-transport
//!
//! Transport-message layer of a Noise secure channel. After a handshake has
//! produced the two cipher directions, a [`Transport`](crypto::Transport)
//! frames each payload with an explicit 64-bit nonce, encrypts it, and on
//! the receiving side filters replayed or stale nonces through a
//! fixed-memory sliding window before decrypting.
//!
//! Messages are self-describing, so they can travel over lossy, reordering
//! datagram transports:
//!
//! ```text
//! [ nonce (8, BE64) | ciphertext | tag (16) ]
//! ```
//!
//! ## Feature Flags
//!
//! - `chachapoly` (default): ChaCha20-Poly1305 [`CipherState`](crypto::CipherState)
//!
//! Without it the crate provides the algorithm-agnostic core: implement
//! [`CipherDirection`](core::CipherDirection) for your own cipher.
//!
//! ## Modules
//!
//! - [`core`]: Constants, error types and the cipher-direction contract
//! - [`crypto`]: Replay window, transport, concrete cipher
//!
//! ## Example Usage
//!
//! ```rust
//! # #[cfg(feature = "chachapoly")]
//! # fn main() -> Result<(), noise_transport::TransportError> {
//! use noise_transport::prelude::*;
//!
//! // Keys as produced by the handshake
//! let k1 = SessionKey::generate();
//! let k2 = SessionKey::generate();
//!
//! let mut initiator = Transport::new(
//!     Role::Initiator,
//!     CipherState::new(k1.clone()),
//!     Some(CipherState::new(k2.clone())),
//! );
//! let mut responder = Transport::new(
//!     Role::Responder,
//!     CipherState::new(k1),
//!     Some(CipherState::new(k2)),
//! );
//!
//! let mut message = [0u8; 64];
//! let len = initiator.write_message(b"ping", &mut message)?;
//!
//! let mut payload = [0u8; 64];
//! let n = responder.read_message(&message[..len], &mut payload)?;
//! assert_eq!(&payload[..n], b"ping");
//!
//! // Replays are rejected before decryption
//! assert!(responder.read_message(&message[..len], &mut payload).unwrap_err().is_replay());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "chachapoly"))]
//! # fn main() {}
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod core;
pub mod crypto;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::crypto::*;
}

// Re-export commonly used items at crate root
pub use crate::core::{CipherDirection, CryptoError, ErrorKind, TransportError};
pub use crate::crypto::{ReplayFilter, ReplayWindow, Role, Transport};

#[cfg(feature = "chachapoly")]
#[cfg_attr(docsrs, doc(cfg(feature = "chachapoly")))]
pub use crate::crypto::{CipherState, SessionKey};
