//! Anti-replay sliding window without bit shifting (RFC 6479).
//!
//! The window is a circular bitmap of [`REPLAY_WORDS`] 64-bit words. A
//! counter maps to word `counter / 64` (modulo the word count) and bit
//! `counter % 64`. When a new highest counter arrives, only the words that
//! scroll into view are cleared, so each call costs O(1) no matter how far
//! the counter jumps.
//!
//! - Above highest: advance the window, accept
//! - More than [`REPLAY_WINDOW_SIZE`] below highest: reject
//! - Bit already set: reject
//!
//! One word is held back from the window size so that a word being reused
//! for new counters never still holds bits the window claims to remember.

use crate::core::{REPLAY_WINDOW_SIZE, REPLAY_WORD_BITS, REPLAY_WORDS};

/// Anti-replay check for message counters.
pub trait ReplayFilter {
    /// Whether `counter` would be accepted, without recording it.
    ///
    /// Must agree with [`validate_counter`](Self::validate_counter): for any
    /// state, `check(c)` returns exactly what `validate_counter(c)` would.
    /// The transport screens with `check` before decrypting and still
    /// rejects the message if the later `validate_counter` refuses.
    fn check(&self, counter: u64) -> bool;

    /// Accept and record `counter` if it is new and inside the window.
    ///
    /// Returns `false` and leaves the filter unchanged otherwise.
    fn validate_counter(&mut self, counter: u64) -> bool;
}

/// Fixed-memory sliding window over the full 64-bit counter space.
///
/// Not thread safe: calls must be applied in the order messages are read.
#[derive(Clone, Debug)]
pub struct ReplayWindow {
    /// Circular bitmap of seen counters
    bitmap: [u64; REPLAY_WORDS],
    /// Highest counter accepted so far
    highest: u64,
}

impl ReplayWindow {
    /// Create an empty window. Counter 0 is acceptable.
    pub fn new() -> Self {
        Self {
            bitmap: [0; REPLAY_WORDS],
            highest: 0,
        }
    }

    /// Highest counter accepted so far (0 on a fresh window).
    pub fn highest(&self) -> u64 {
        self.highest
    }

    fn word_index(counter: u64) -> u64 {
        counter / REPLAY_WORD_BITS as u64
    }

    fn slot(counter: u64) -> usize {
        (Self::word_index(counter) % REPLAY_WORDS as u64) as usize
    }

    fn bit(counter: u64) -> u64 {
        1 << (counter % REPLAY_WORD_BITS as u64)
    }

    /// Clear the words between the current highest and `counter`.
    fn advance(&mut self, counter: u64) {
        let current = Self::word_index(self.highest);
        let diff = (Self::word_index(counter) - current).min(REPLAY_WORDS as u64);
        for i in 1..=diff {
            self.bitmap[((current + i) % REPLAY_WORDS as u64) as usize] = 0;
        }
        self.highest = counter;
    }
}

impl ReplayFilter for ReplayWindow {
    fn check(&self, counter: u64) -> bool {
        if counter > self.highest {
            return true;
        }
        if self.highest - counter > REPLAY_WINDOW_SIZE {
            return false;
        }
        self.bitmap[Self::slot(counter)] & Self::bit(counter) == 0
    }

    fn validate_counter(&mut self, counter: u64) -> bool {
        if counter > self.highest {
            self.advance(counter);
        } else if self.highest - counter > REPLAY_WINDOW_SIZE {
            // Too old, nothing to update
            return false;
        }

        let slot = Self::slot(counter);
        let old = self.bitmap[slot];
        let new = old | Self::bit(counter);
        if old == new {
            return false;
        }
        self.bitmap[slot] = new;
        true
    }
}

impl Default for ReplayWindow {
    fn default() -> Self {
        Self::new()
    }
}
