//! Protocol constants for Noise transport messages.
//!
//! These values are fixed by the protocol and MUST NOT be changed: peers
//! disagreeing on any of them will reject each other's messages.

// =============================================================================
// MESSAGE LIMITS (Noise, section 3)
// =============================================================================

/// Maximum length of a transport message on the wire, header and tag included.
pub const MAX_MESSAGE_LENGTH: usize = 65535;

/// Size of the explicit nonce header prepended to every transport message.
pub const NONCE_HEADER_SIZE: usize = size_of::<u64>();

// =============================================================================
// CRYPTOGRAPHIC CONSTANTS
// =============================================================================

/// Poly1305 authentication tag size.
pub const AEAD_TAG_SIZE: usize = 16;

/// ChaCha20-Poly1305 (IETF) nonce size.
pub const AEAD_NONCE_SIZE: usize = 12;

/// Symmetric session key size.
pub const SESSION_KEY_SIZE: usize = 32;

/// Reserved nonce value. Never used for a message; used by rekey.
pub const MAX_NONCE: u64 = u64::MAX;

// =============================================================================
// ANTI-REPLAY (RFC 6479)
// =============================================================================

/// Total capacity of the replay bitmap in bits.
pub const REPLAY_WINDOW_BITS: usize = 2048;

/// Width of a single bitmap word in bits.
pub const REPLAY_WORD_BITS: usize = u64::BITS as usize;

/// Number of words in the replay bitmap.
pub const REPLAY_WORDS: usize = REPLAY_WINDOW_BITS / REPLAY_WORD_BITS;

/// Furthest distance behind the highest accepted counter that is still
/// distinguishable. One word of the bitmap is kept as slack.
pub const REPLAY_WINDOW_SIZE: u64 = (REPLAY_WINDOW_BITS - REPLAY_WORD_BITS) as u64;
