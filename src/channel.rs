//! Definition of a named logging channel.

use crate::{ArrayBuf, Buffer, Error, ErrorPolicy, LoggerConfig, NullBuf, Prefixed};
use std::io;

#[cfg(any(feature = "zerocopy", feature = "bytemuck"))]
use crate::Record;

/// Names of the channels every [`Logger`](crate::Logger) carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    Info,
    Debug,
}

impl ChannelId {
    /// Every channel, in declaration order.
    pub const ALL: [ChannelId; 2] = [ChannelId::Info, ChannelId::Debug];

    /// Human readable name of the channel.
    pub const fn name(self) -> &'static str {
        match self {
            ChannelId::Info => "info",
            ChannelId::Debug => "debug",
        }
    }

    /// Prefix used when none is configured.
    pub const fn default_prefix(self) -> &'static str {
        match self {
            ChannelId::Info => "[info]: ",
            ChannelId::Debug => "[debug]: ",
        }
    }
}

/// Buffering stack behind a channel.
#[derive(Debug)]
enum Stack<W: io::Write, const N: usize> {
    Active(Prefixed<ArrayBuf<W, N>>),
    Disabled(NullBuf),
}

/// A named logging destination.
///
/// Pairs a prefix, a fixed capacity buffer of N bytes and a sink. Bytes
/// written to the channel are batched in place and reach the sink in order,
/// with the prefix ahead of the first byte of every flush cycle.
///
/// * Writes never allocate.
/// * A disabled channel does no buffering at all and never touches a sink.
/// * Channel state is not synchronized, share it between threads behind a lock.
///
/// Channel also implements [`io::Write`], so `write!` and `writeln!` format
/// straight into the buffer.
#[derive(Debug)]
pub struct Channel<W: io::Write, const N: usize> {
    id: ChannelId,
    policy: ErrorPolicy,

    // First sink failure not yet taken by the caller.
    error: Option<io::Error>,

    stack: Stack<W, N>,
}

impl<W: io::Write, const N: usize> Channel<W, N> {
    /// Create a new instance of [`Channel`].
    ///
    /// If logging is disabled in `config`, the sink is dropped right away.
    ///
    /// # Panic
    ///
    /// * Panics if N == 0 and the channel is enabled.
    ///
    /// # Arguments
    ///
    /// * `id` - Name of the channel.
    /// * `sink` - Destination of flushed bytes.
    /// * `config` - Prefix, error policy and enablement of the channel.
    #[track_caller]
    pub fn new(id: ChannelId, sink: W, config: &LoggerConfig) -> Self {
        let stack = if config.enabled() {
            let prefix = config.prefix(id).as_bytes();
            Stack::Active(Prefixed::new(prefix, ArrayBuf::new(sink)))
        } else {
            Stack::Disabled(NullBuf)
        };

        Self {
            id,
            stack,
            error: None,
            policy: config.error_policy(),
        }
    }

    /// Create a channel that discards everything written to it.
    pub fn disabled(id: ChannelId) -> Self {
        Self {
            id,
            error: None,
            policy: ErrorPolicy::default(),
            stack: Stack::Disabled(NullBuf),
        }
    }

    /// Name of this channel.
    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// true if bytes written to this channel can reach a sink.
    pub fn is_enabled(&self) -> bool {
        matches!(self.stack, Stack::Active(_))
    }

    /// Number of bytes of the current cycle still held in the buffer.
    pub fn buffered(&self) -> usize {
        match &self.stack {
            Stack::Active(buf) => buf.len(),
            Stack::Disabled(buf) => buf.len(),
        }
    }

    /// Append bytes to the current flush cycle.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Bytes to append.
    #[inline]
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let result = match &mut self.stack {
            Stack::Active(buf) => buf.write(bytes),
            Stack::Disabled(buf) => buf.write(bytes),
        };

        self.settle(result)
    }

    /// Close the current flush cycle.
    ///
    /// Every buffered byte reaches the sink, and the prefix is sent even when
    /// nothing was written since the previous flush.
    pub fn flush(&mut self) -> Result<(), Error> {
        let result = match &mut self.stack {
            Stack::Active(buf) => buf.flush(),
            Stack::Disabled(buf) => buf.flush(),
        };

        self.settle(result)
    }

    /// true if the sink failed since the error was last taken.
    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Take the first sink failure retained by this channel.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Apply error policy to the outcome of a buffer operation.
    fn settle(&mut self, result: io::Result<()>) -> Result<(), Error> {
        let Err(error) = result else {
            return Ok(());
        };

        match self.policy {
            ErrorPolicy::Retain => {
                if self.error.is_none() {
                    self.error = Some(error);
                }

                Ok(())
            }

            ErrorPolicy::Propagate => Err(Error::Sink(self.id.name(), error)),
        }
    }
}

#[cfg(any(feature = "zerocopy", feature = "bytemuck"))]
impl<W: io::Write, const N: usize> Channel<W, N> {
    /// Append the raw bytes of a record to the current flush cycle.
    ///
    /// # Arguments
    ///
    /// * `record` - Record to append.
    pub fn write_record<T: Record>(&mut self, record: &T) -> Result<(), Error> {
        self.write(T::to_bytes(record))
    }

    /// Append the raw bytes of a slice of records to the current flush cycle.
    ///
    /// # Arguments
    ///
    /// * `records` - Records to append.
    pub fn write_records<T: Record>(&mut self, records: &[T]) -> Result<(), Error> {
        self.write(T::to_bytes_slice(records))
    }
}

impl<W: io::Write, const N: usize> io::Write for Channel<W, N> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Channel::write(self, buf)?;
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        Ok(Channel::write(self, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(Channel::flush(self)?)
    }
}
