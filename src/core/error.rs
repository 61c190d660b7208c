//! Error types for Noise transport messages.

use thiserror::Error;

use crate::crypto::Role;

/// Errors raised by a cipher direction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The cipher direction holds no key (never initialized or disposed).
    #[error("cipher direction has no key")]
    MissingKey,

    /// Nonce counter reached the reserved value - the direction must be rekeyed
    /// or the session terminated.
    #[error("nonce counter exhausted")]
    NonceExhausted,

    /// AEAD encryption failed.
    #[error("AEAD encryption failed")]
    EncryptionFailed,

    /// AEAD decryption failed (invalid tag or corrupted).
    #[error("AEAD decryption failed (invalid tag or corrupted)")]
    DecryptionFailed,

    /// Output buffer cannot hold the result.
    #[error("output buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes required.
        needed: usize,
        /// Bytes available.
        available: usize,
    },
}

/// Errors raised by a [`Transport`](crate::crypto::Transport).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The transport has been disposed.
    #[error("transport has been disposed")]
    Disposed,

    /// This role has no outbound direction on a one-way stream.
    #[error("{role} cannot write messages to a one-way stream")]
    WriteNotPermitted {
        /// Role of the local side.
        role: Role,
    },

    /// This role has no inbound direction on a one-way stream.
    #[error("{role} cannot read messages from a one-way stream")]
    ReadNotPermitted {
        /// Role of the local side.
        role: Role,
    },

    /// The responder-to-initiator direction does not exist.
    #[error("cannot rekey responder to initiator in a one-way stream")]
    OneWayRekey,

    /// Message (or the message a payload would produce) exceeds the protocol limit.
    #[error("message of {len} bytes exceeds the maximum of {max} bytes")]
    MessageTooLarge {
        /// Message length.
        len: usize,
        /// Protocol maximum.
        max: usize,
    },

    /// Message is too short to carry a nonce header and a tag.
    #[error("message of {len} bytes is shorter than the minimum of {min} bytes")]
    MessageTooShort {
        /// Message length.
        len: usize,
        /// Protocol minimum.
        min: usize,
    },

    /// Caller's output buffer cannot hold the result.
    #[error("output buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Bytes required.
        needed: usize,
        /// Bytes available.
        available: usize,
    },

    /// Nonce is outside the replay window or was already seen.
    #[error("nonce {nonce} is outside the replay window or was already used")]
    ReplayDetected {
        /// Offending nonce.
        nonce: u64,
    },

    /// The cipher direction failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

/// Coarse classification of a [`TransportError`].
///
/// Lets an I/O loop decide between dropping a single datagram and tearing
/// the session down without matching every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Programmer error: wrong role, missing direction, use after dispose.
    Misuse,
    /// A length bound was violated before any cryptographic work.
    Size,
    /// Replayed or too-old nonce.
    Replay,
    /// Authentication tag did not verify.
    Authentication,
    /// Any other cipher failure (nonce exhaustion, encryption failure).
    Cipher,
}

impl TransportError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Disposed
            | Self::WriteNotPermitted { .. }
            | Self::ReadNotPermitted { .. }
            | Self::OneWayRekey
            | Self::Crypto(CryptoError::MissingKey) => ErrorKind::Misuse,
            Self::MessageTooLarge { .. }
            | Self::MessageTooShort { .. }
            | Self::BufferTooSmall { .. }
            | Self::Crypto(CryptoError::BufferTooSmall { .. }) => ErrorKind::Size,
            Self::ReplayDetected { .. } => ErrorKind::Replay,
            Self::Crypto(CryptoError::DecryptionFailed) => ErrorKind::Authentication,
            Self::Crypto(CryptoError::NonceExhausted | CryptoError::EncryptionFailed) => {
                ErrorKind::Cipher
            }
        }
    }

    /// Whether this is a replay rejection.
    pub fn is_replay(&self) -> bool {
        self.kind() == ErrorKind::Replay
    }

    /// Whether this is an authentication failure.
    pub fn is_authentication_failure(&self) -> bool {
        self.kind() == ErrorKind::Authentication
    }
}
