//! Single-slot "latest value" exchange between one writer and one reader.
//!
//! Publishing overwrites whatever is in the slot; nothing is ever queued, so a
//! slow reader only ever sees the newest value and never accumulates backlog.

use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
pub struct Mailbox<T> {
    slot: Mutex<Option<T>>,
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        // a panicking writer cannot leave a half-written Option behind
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the slot contents with `value`.
    pub fn publish(&self, value: T) {
        *self.lock() = Some(value);
    }

    /// Most recent value, emptying the slot.
    pub fn take(&self) -> Option<T> {
        self.lock().take()
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }
}

impl<T: Clone> Mailbox<T> {
    /// Most recent value, left in place for later reads.
    pub fn latest(&self) -> Option<T> {
        self.lock().clone()
    }
}
