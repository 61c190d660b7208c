//! Transport messages over a pair of cipher directions
//!
//! Every message carries its own nonce so that datagrams may be lost or
//! reordered:
//! ```text
//! [ nonce (8, BE64) | ciphertext | tag ]
//! ```
//! Inbound nonces pass through the replay window before any decryption.
//!
//! # Thread safety
//!
//! A [`Transport`] is plain mutable state with no internal locking. Callers
//! that read and write from different threads must synchronize externally.

use std::fmt;

use zeroize::Zeroize;

use crate::core::{
    CipherDirection, TransportError, MAX_MESSAGE_LENGTH, NONCE_HEADER_SIZE,
};

use super::replay::{ReplayFilter, ReplayWindow};

/// Which side of the handshake this transport belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Sent the first handshake message.
    Initiator,
    /// Received the first handshake message.
    Responder,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Initiator => f.write_str("initiator"),
            Role::Responder => f.write_str("responder"),
        }
    }
}

/// Post-handshake transport: writes and reads nonce-framed AEAD messages.
///
/// The initiator sends with the initiator-to-responder direction and
/// receives with the responder-to-initiator one; the responder does the
/// reverse. Without a responder-to-initiator direction the transport is a
/// one-way stream, permanently.
///
/// Key material is released by [`dispose`](Self::dispose) or on drop,
/// whichever comes first.
pub struct Transport<C: CipherDirection, F: ReplayFilter = ReplayWindow> {
    /// Our role
    role: Role,
    /// Initiator -> responder direction
    initiator_to_responder: C,
    /// Responder -> initiator direction, absent on one-way streams
    responder_to_initiator: Option<C>,
    /// Guards the receiving direction
    replay: F,
    disposed: bool,
}

impl<C: CipherDirection> Transport<C> {
    /// Create a transport from the directions produced by a handshake.
    pub fn new(role: Role, initiator_to_responder: C, responder_to_initiator: Option<C>) -> Self {
        Self::with_filter(
            role,
            initiator_to_responder,
            responder_to_initiator,
            ReplayWindow::new(),
        )
    }
}

impl<C: CipherDirection, F: ReplayFilter> Transport<C, F> {
    /// Create a transport with a custom replay filter.
    pub fn with_filter(
        role: Role,
        initiator_to_responder: C,
        responder_to_initiator: Option<C>,
        replay: F,
    ) -> Self {
        tracing::debug!(
            %role,
            one_way = responder_to_initiator.is_none(),
            "transport established"
        );
        Self {
            role,
            initiator_to_responder,
            responder_to_initiator,
            replay,
            disposed: false,
        }
    }

    /// Our role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether only the initiator-to-responder direction exists.
    pub fn is_one_way(&self) -> Result<bool, TransportError> {
        self.ensure_live()?;
        Ok(self.responder_to_initiator.is_none())
    }

    /// Whether [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn ensure_live(&self) -> Result<(), TransportError> {
        if self.disposed {
            return Err(TransportError::Disposed);
        }
        Ok(())
    }

    /// Encrypt `payload` into `message`, returning the message length.
    ///
    /// On error the nonce header is not written. A failed encryption may
    /// still leave partial output in the body.
    ///
    /// # Errors
    /// - `Disposed`, `WriteNotPermitted` (responder on a one-way stream)
    /// - `MessageTooLarge` / `BufferTooSmall` before any encryption
    /// - cipher failures as `Crypto`
    pub fn write_message(
        &mut self,
        payload: &[u8],
        message: &mut [u8],
    ) -> Result<usize, TransportError> {
        self.ensure_live()?;

        let role = self.role;
        let cipher = match role {
            Role::Initiator => &mut self.initiator_to_responder,
            Role::Responder => self
                .responder_to_initiator
                .as_mut()
                .ok_or(TransportError::WriteNotPermitted { role })?,
        };

        let len = payload.len() + C::TAG_SIZE + NONCE_HEADER_SIZE;
        if len > MAX_MESSAGE_LENGTH {
            return Err(TransportError::MessageTooLarge {
                len,
                max: MAX_MESSAGE_LENGTH,
            });
        }
        if len > message.len() {
            return Err(TransportError::BufferTooSmall {
                needed: len,
                available: message.len(),
            });
        }

        let nonce = cipher.nonce();
        let (header, body) = message.split_at_mut(NONCE_HEADER_SIZE);
        let written = cipher.encrypt_with_ad(None, payload, body)? + NONCE_HEADER_SIZE;
        // Header goes in last so a failed encryption leaves it untouched
        header.copy_from_slice(&nonce.to_be_bytes());

        tracing::trace!(%role, nonce, len = written, "wrote transport message");
        Ok(written)
    }

    /// Decrypt `message` into `payload`, returning the payload length.
    ///
    /// The nonce is checked against the replay window first; a rejected
    /// nonce causes no decryption. The nonce is recorded only once the tag
    /// verifies, so a forged message cannot burn a legitimate nonce. If the
    /// filter then refuses to record it, the decrypted payload is wiped and
    /// the read fails with `ReplayDetected`.
    ///
    /// # Errors
    /// - `Disposed`, `ReadNotPermitted` (initiator on a one-way stream)
    /// - `MessageTooLarge` / `MessageTooShort` / `BufferTooSmall`
    /// - `ReplayDetected` for an old or repeated nonce
    /// - `Crypto(DecryptionFailed)` when authentication fails
    pub fn read_message(
        &mut self,
        message: &[u8],
        payload: &mut [u8],
    ) -> Result<usize, TransportError> {
        self.ensure_live()?;

        let role = self.role;
        let cipher = match role {
            Role::Initiator => self
                .responder_to_initiator
                .as_mut()
                .ok_or(TransportError::ReadNotPermitted { role })?,
            Role::Responder => &mut self.initiator_to_responder,
        };

        let len = message.len();
        let min = NONCE_HEADER_SIZE + C::TAG_SIZE;
        if len > MAX_MESSAGE_LENGTH {
            return Err(TransportError::MessageTooLarge {
                len,
                max: MAX_MESSAGE_LENGTH,
            });
        }
        if len < min {
            return Err(TransportError::MessageTooShort { len, min });
        }
        if len - min > payload.len() {
            return Err(TransportError::BufferTooSmall {
                needed: len - min,
                available: payload.len(),
            });
        }

        let (header, ciphertext) = message.split_at(NONCE_HEADER_SIZE);
        let mut nonce_bytes = [0u8; NONCE_HEADER_SIZE];
        nonce_bytes.copy_from_slice(header);
        let nonce = u64::from_be_bytes(nonce_bytes);

        if !self.replay.check(nonce) {
            tracing::debug!(%role, nonce, "rejected replayed transport message");
            return Err(TransportError::ReplayDetected { nonce });
        }

        let previous = cipher.nonce();
        cipher.set_nonce(nonce);
        match cipher.decrypt_with_ad(None, ciphertext, payload) {
            Ok(read) => {
                if !self.replay.validate_counter(nonce) {
                    payload[..read].zeroize();
                    cipher.set_nonce(previous);
                    tracing::warn!(%role, nonce, "replay filter refused a nonce it had passed");
                    return Err(TransportError::ReplayDetected { nonce });
                }
                tracing::trace!(%role, nonce, len = read, "read transport message");
                Ok(read)
            }
            Err(e) => {
                cipher.set_nonce(previous);
                tracing::debug!(%role, nonce, error = %e, "failed to decrypt transport message");
                Err(e.into())
            }
        }
    }

    /// Rotate the initiator-to-responder key.
    pub fn rekey_initiator_to_responder(&mut self) -> Result<(), TransportError> {
        self.ensure_live()?;
        self.initiator_to_responder.rekey()?;
        tracing::debug!(role = %self.role, "rekeyed initiator to responder");
        Ok(())
    }

    /// Rotate the responder-to-initiator key.
    ///
    /// Fails with `OneWayRekey` on a one-way stream.
    pub fn rekey_responder_to_initiator(&mut self) -> Result<(), TransportError> {
        self.ensure_live()?;
        self.responder_to_initiator
            .as_mut()
            .ok_or(TransportError::OneWayRekey)?
            .rekey()?;
        tracing::debug!(role = %self.role, "rekeyed responder to initiator");
        Ok(())
    }

    /// Zeroize both directions. Further calls are no-ops; every other
    /// operation fails with `Disposed` afterwards.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.initiator_to_responder.dispose();
        if let Some(cipher) = self.responder_to_initiator.as_mut() {
            cipher.dispose();
        }
        self.disposed = true;
        tracing::debug!(role = %self.role, "transport disposed");
    }
}

impl<C: CipherDirection, F: ReplayFilter> Drop for Transport<C, F> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<C: CipherDirection, F: ReplayFilter> fmt::Debug for Transport<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("role", &self.role)
            .field("one_way", &self.responder_to_initiator.is_none())
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
