//! Reusable buffer for header text
//!
//! Headers are copied out of the mapping one at a time while scanning, so the
//! same buffer is refilled for every record. Capacity starts at
//! [`INITIAL_HEADER_CAPACITY`] and doubles until the header fits, which keeps
//! reallocations logarithmic in the longest header seen.

use crate::error::{ExtractError, Result};

/// First guess at header size, doubled whenever a header exceeds it
pub const INITIAL_HEADER_CAPACITY: usize = 200;

/// Growable header buffer with a doubling policy
#[derive(Debug, Clone)]
pub struct HeaderBuffer {
    buf: Vec<u8>,
    capacity: usize,
}

impl HeaderBuffer {
    /// Create a buffer with the default initial capacity
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_HEADER_CAPACITY)
    }

    /// Create a buffer with a given initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Current capacity under the doubling policy
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Grow until the buffer can hold more than `needed` bytes
    ///
    /// Capacity doubles on each step. On failure the buffer and its current
    /// contents are left untouched and [`ExtractError::Alloc`] is returned.
    pub fn ensure_capacity(&mut self, needed: usize) -> Result<()> {
        let mut target = self.capacity.max(1);
        while target <= needed {
            target = target
                .checked_mul(2)
                .ok_or(ExtractError::Alloc { requested: needed })?;
        }
        if target == self.capacity {
            return Ok(());
        }

        let additional = target.saturating_sub(self.buf.len());
        self.buf
            .try_reserve_exact(additional)
            .map_err(|_| ExtractError::Alloc { requested: target })?;
        self.capacity = target;
        Ok(())
    }

    /// Replace the contents with `header` and return the stored copy
    pub fn fill(&mut self, header: &[u8]) -> Result<&[u8]> {
        self.ensure_capacity(header.len())?;
        self.buf.clear();
        self.buf.extend_from_slice(header);
        Ok(&self.buf)
    }

    /// Stored header
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Number of stored bytes
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Default for HeaderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
