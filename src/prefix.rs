//! Definition of a buffer decorator that tags every flush cycle with a prefix.

use crate::Buffer;
use std::io;

/// Wraps a [`Buffer`] and emits a constant prefix once per flush cycle.
///
/// A flush cycle is the span between two explicit calls to [`Buffer::flush`].
/// Overflows inside the wrapped buffer do not close a cycle, so a line that
/// spills over capacity many times still gets a single prefix.
///
/// The prefix is written straight to the sink, just before the first byte of
/// the cycle leaves the wrapped buffer. Writes that fit in the wrapped buffer
/// therefore cause no sink traffic until the cycle is flushed.
#[derive(Debug)]
pub struct Prefixed<B: Buffer> {
    // Emitted at the start of every cycle.
    prefix: &'static [u8],

    // true until the prefix of the current cycle reached the sink.
    pending: bool,

    // Buffer that batches bytes of the cycle.
    inner: B,
}

impl<B: Buffer> Prefixed<B> {
    /// Create a new instance of [`Prefixed`].
    ///
    /// # Arguments
    ///
    /// * `prefix` - Bytes emitted once per flush cycle.
    /// * `inner` - Buffer to decorate.
    pub fn new(prefix: &'static [u8], inner: B) -> Self {
        Self {
            prefix,
            pending: true,
            inner,
        }
    }

    /// Prefix emitted once per flush cycle.
    pub fn prefix(&self) -> &'static [u8] {
        self.prefix
    }

    /// true if the prefix of the current cycle has not reached the sink yet.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Reference to the decorated buffer.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    fn emit_prefix(&mut self) -> io::Result<()> {
        self.pending = false;
        self.inner.write_direct(self.prefix)
    }
}

impl<B: Buffer> Buffer for Prefixed<B> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        // Wrapped buffer is about to overflow, prefix must get there first.
        let prefixed = if self.pending && bytes.len() > self.inner.remaining() {
            self.emit_prefix()
        } else {
            Ok(())
        };

        // Payload is buffered regardless of how the prefix fared.
        let written = self.inner.write(bytes);
        prefixed.and(written)
    }

    fn write_direct(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_direct(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        // Even an empty cycle produces its prefix.
        let prefixed = if self.pending {
            self.emit_prefix()
        } else {
            Ok(())
        };

        // Close the cycle regardless of how the prefix fared.
        self.pending = true;
        let flushed = self.inner.flush();

        prefixed.and(flushed)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn remaining(&self) -> usize {
        self.inner.remaining()
    }
}

impl<B: Buffer> Drop for Prefixed<B> {
    fn drop(&mut self) {
        // Never emit a bare prefix just because a channel went away.
        if !self.inner.is_empty() {
            let _ = Buffer::flush(self);
        }
    }
}
