//! Single-slot command handoff between the receive path and the main loop.

use portable_atomic::{AtomicU8, Ordering};

/// Holds the most recently decoded command id until someone takes it
///
/// A value of 0 means no command is pending. Writes overwrite whatever was
/// there, so a consumer that falls behind only ever sees the newest id.
/// Both operations are a single atomic instruction on the same cell, which
/// makes the latch safe to share between an interrupt handler and thread
/// mode code as a plain `static`.
#[derive(Debug)]
pub struct CommandLatch {
    slot: AtomicU8,
}

impl Default for CommandLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandLatch {
    /// Create an empty latch
    pub const fn new() -> Self {
        Self {
            slot: AtomicU8::new(0),
        }
    }

    /// Store `id`, replacing any value not yet taken
    pub fn publish(&self, id: u8) {
        self.slot.store(id, Ordering::Release);
    }

    /// Return the pending id and leave the latch empty
    pub fn take(&self) -> u8 {
        self.slot.swap(0, Ordering::AcqRel)
    }

    /// Look at the pending id without consuming it
    pub fn peek(&self) -> u8 {
        self.slot.load(Ordering::Acquire)
    }
}
