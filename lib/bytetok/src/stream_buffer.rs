//! Fixed-capacity read buffer between the token scanner and its source.
//!
//! Bytes are pulled from the source in bulk and served one at a time. A
//! refill happens only when every buffered byte has been consumed, and an
//! empty bulk read is never trusted as end-of-stream on its own: the buffer
//! follows up with a blocking single-byte read so that an idle interactive
//! source is told apart from a closed one.
//!
//! Changing the capacity mid-stream carries all unread bytes over; they are
//! served before the next refill. At capacity zero no bulk refills happen at
//! all and every byte is read directly from the source.

use std::io;

use crate::source::ByteSource;

/// Default refill capacity in bytes.
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// Buffered reader state: owned storage, a cursor, and the refill capacity.
///
/// # Invariant
///
/// `data[pos..]` is the unread region; everything before `pos` has been
/// consumed. `data.len()` stays within `capacity` except when a resize
/// carried over more unread bytes than the new capacity holds, or when a
/// single-byte lookahead stashed a byte at capacity zero.
#[derive(Debug)]
pub(crate) struct StreamBuffer {
    /// Buffered bytes; `data[pos..]` is unread.
    data: Vec<u8>,
    /// Cursor into `data`.
    pos: usize,
    /// Refill size. Zero disables bulk refills entirely.
    capacity: usize,
}

impl StreamBuffer {
    /// Create an empty buffer. Storage is allocated on first refill.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            data: Vec::new(),
            pos: 0,
            capacity,
        }
    }

    /// Configured refill capacity in bytes.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the refill capacity, carrying unread bytes over.
    ///
    /// Carried bytes are served before the next refill even when the new
    /// capacity is smaller than what they occupy (including zero).
    pub(crate) fn set_capacity(&mut self, capacity: usize) {
        if self.pos > 0 {
            self.data.drain(..self.pos);
            self.pos = 0;
        }
        tracing::debug!(capacity, carried = self.data.len(), "resized stream buffer");
        self.capacity = capacity;
    }

    /// Drop all buffered state. Used when rebinding to a new source.
    pub(crate) fn reset(&mut self) {
        self.data.clear();
        self.pos = 0;
    }

    /// Consume and return the next byte. `Ok(None)` is true end-of-stream.
    pub(crate) fn next_byte(&mut self, source: &mut dyn ByteSource) -> io::Result<Option<u8>> {
        if self.pos < self.data.len() {
            let byte = self.data[self.pos];
            self.pos += 1;
            return Ok(Some(byte));
        }
        if self.capacity == 0 {
            return source.read_byte();
        }
        if self.refill(source)? == 0 {
            return Ok(None);
        }
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(Some(byte))
    }

    /// Return the next byte without consuming it.
    ///
    /// At capacity zero the byte is read from the source and stashed so the
    /// following [`next_byte`](Self::next_byte) serves it; consumption order
    /// is unaffected.
    pub(crate) fn peek_byte(&mut self, source: &mut dyn ByteSource) -> io::Result<Option<u8>> {
        if self.pos < self.data.len() {
            return Ok(Some(self.data[self.pos]));
        }
        if self.capacity == 0 {
            return match source.read_byte()? {
                Some(byte) => {
                    self.data.clear();
                    self.data.push(byte);
                    self.pos = 0;
                    Ok(Some(byte))
                }
                None => Ok(None),
            };
        }
        if self.refill(source)? == 0 {
            return Ok(None);
        }
        Ok(Some(self.data[self.pos]))
    }

    /// Refill from the source, returning the number of bytes now buffered.
    /// Zero means true end-of-stream.
    ///
    /// # Contract
    ///
    /// Only called with the buffer fully consumed and a nonzero capacity.
    /// On an I/O error the unread region stays empty, so the next call
    /// simply attempts the refill again instead of serving stale storage.
    fn refill(&mut self, source: &mut dyn ByteSource) -> io::Result<usize> {
        debug_assert_eq!(self.pos, self.data.len(), "refill with unread bytes buffered");
        debug_assert!(self.capacity > 0, "refill in unbuffered mode");

        self.data.resize(self.capacity, 0);
        self.pos = self.data.len();

        let mut read = source.read_available(&mut self.data)?;
        if read == 0 {
            // Nothing was queued; block for one byte to tell an idle
            // interactive source from a finished one.
            tracing::trace!("empty bulk read; blocking for one byte");
            read = match source.read_byte()? {
                Some(byte) => {
                    self.data[0] = byte;
                    1
                }
                None => 0,
            };
        }

        self.data.truncate(read);
        self.pos = 0;
        tracing::trace!(capacity = self.capacity, read, "refilled stream buffer");
        Ok(read)
    }
}
