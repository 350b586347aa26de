//! Definition of buffers that batch bytes on their way to a sink.

use std::{cmp::min, io};

/// A component that accepts bytes and forwards them to a sink.
///
/// This is the seam that lets [`Prefixed`](crate::Prefixed) wrap either a real
/// [`ArrayBuf`] or a [`NullBuf`] without caring which one it got.
pub trait Buffer {
    /// Append bytes into the buffer.
    ///
    /// Bytes that do not fit are handed to the sink in bulk before buffering
    /// continues. This never closes a flush cycle.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Bytes to append.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Write bytes straight to the sink, skipping anything currently buffered.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Bytes to write.
    fn write_direct(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Hand all buffered bytes to the sink and ask the sink to flush.
    fn flush(&mut self) -> io::Result<()>;

    /// Number of bytes currently held in the buffer.
    fn len(&self) -> usize;

    /// Number of bytes that can be appended without an overflow flush.
    fn remaining(&self) -> usize;

    /// true if the buffer holds no bytes, false otherwise.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A fixed capacity buffer that holds bytes in place.
///
/// * Storage is an inline array, there is no allocation for the lifetime of the buffer.
/// * Overflow hands the buffered bytes to the sink in a single write.
/// * Any buffered bytes are flushed when the buffer is dropped.
///
/// The sink is any [`io::Write`]. Pass `&mut W` to keep ownership of the sink
/// with the caller, the buffer never closes it.
#[derive(Debug)]
pub struct ArrayBuf<W: io::Write, const N: usize> {
    // Index where the next byte lands.
    len: usize,

    // In place storage for buffered bytes.
    storage: [u8; N],

    // Destination of flushed bytes.
    sink: W,
}

impl<W: io::Write, const N: usize> ArrayBuf<W, N> {
    /// Maximum number of bytes the buffer holds before it overflows.
    pub const CAPACITY: usize = N;

    /// Create a new instance of [`ArrayBuf`].
    ///
    /// # Panic
    ///
    /// * Panics if N == 0.
    ///
    /// # Arguments
    ///
    /// * `sink` - Destination for flushed bytes.
    #[track_caller]
    pub fn new(sink: W) -> Self {
        assert!(N > 0, "Buf should have capacity > 0");

        Self {
            len: 0,
            storage: [0; N],
            sink,
        }
    }

    /// Maximum number of bytes buffer can hold.
    pub fn capacity(&self) -> usize {
        N
    }

    /// Slice of bytes held in the buffer.
    pub fn bytes(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Reference to the underlying sink.
    pub fn sink(&self) -> &W {
        &self.sink
    }

    /// Hand all buffered bytes to the sink in one write.
    ///
    /// Cursor is reset before the sink sees the bytes, a failing sink cannot
    /// leave the buffer stuck at capacity.
    fn commit(&mut self) -> io::Result<()> {
        let len = std::mem::take(&mut self.len);

        // Nothing to transfer, leave the sink alone.
        if len == 0 {
            return Ok(());
        }

        self.sink.write_all(&self.storage[..len])
    }
}

impl<W: io::Write, const N: usize> Buffer for ArrayBuf<W, N> {
    fn write(&mut self, mut bytes: &[u8]) -> io::Result<()> {
        // First sink failure, only the rejected chunk is lost.
        let mut result = Ok(());

        while !bytes.is_empty() {
            // Only overflow once there is actually a byte with no room left.
            if self.len == N {
                let committed = self.commit();
                result = result.and(committed);
            }

            // Copy as much as fits in one shot.
            let (append, next_append) = bytes.split_at(min(N - self.len, bytes.len()));
            self.storage[self.len..(self.len + append.len())].copy_from_slice(append);
            self.len += append.len();

            // Remaining bytes for next iteration.
            bytes = next_append;
        }

        result
    }

    fn write_direct(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.sink.write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.commit()?;
        self.sink.flush()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn remaining(&self) -> usize {
        N - self.len
    }
}

impl<W: io::Write, const N: usize> Drop for ArrayBuf<W, N> {
    fn drop(&mut self) {
        if self.len > 0 {
            // Nobody is left to observe the error.
            let _ = Buffer::flush(self);
        }
    }
}

/// A growable buffer that holds a whole flush cycle on the heap.
///
/// The allocating counterpart of [`ArrayBuf`]. It never overflows, so each
/// flush hands the entire cycle to the sink in a single write. Storage grows to
/// the longest cycle seen and is reused afterwards.
#[derive(Debug)]
pub struct VecBuf<W: io::Write> {
    storage: Vec<u8>,
    sink: W,
}

impl<W: io::Write> VecBuf<W> {
    /// Create a new instance of [`VecBuf`].
    ///
    /// # Arguments
    ///
    /// * `sink` - Destination for flushed bytes.
    pub fn new(sink: W) -> Self {
        Self::with_capacity(0, sink)
    }

    /// Create a new instance of [`VecBuf`] with room for `capacity` bytes
    /// before the first reallocation.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Bytes to reserve up front.
    /// * `sink` - Destination for flushed bytes.
    pub fn with_capacity(capacity: usize, sink: W) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            sink,
        }
    }

    /// Slice of bytes held in the buffer.
    pub fn bytes(&self) -> &[u8] {
        &self.storage
    }

    /// Reference to the underlying sink.
    pub fn sink(&self) -> &W {
        &self.sink
    }

    fn commit(&mut self) -> io::Result<()> {
        if self.storage.is_empty() {
            return Ok(());
        }

        let result = self.sink.write_all(&self.storage);
        self.storage.clear();
        result
    }
}

impl<W: io::Write> Buffer for VecBuf<W> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.storage.extend_from_slice(bytes);
        Ok(())
    }

    fn write_direct(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.sink.write_all(bytes)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.commit()?;
        self.sink.flush()
    }

    fn len(&self) -> usize {
        self.storage.len()
    }

    fn remaining(&self) -> usize {
        usize::MAX
    }
}

impl<W: io::Write> Drop for VecBuf<W> {
    fn drop(&mut self) {
        if !self.storage.is_empty() {
            let _ = Buffer::flush(self);
        }
    }
}

/// A buffer that discards everything written to it.
///
/// Stands in for the whole buffering stack when logging is disabled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NullBuf;

impl Buffer for NullBuf {
    #[inline]
    fn write(&mut self, _bytes: &[u8]) -> io::Result<()> {
        Ok(())
    }

    #[inline]
    fn write_direct(&mut self, _bytes: &[u8]) -> io::Result<()> {
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    #[inline]
    fn len(&self) -> usize {
        0
    }

    #[inline]
    fn remaining(&self) -> usize {
        usize::MAX
    }
}
