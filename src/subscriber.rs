//! Bridge between the tracing crate and channels.
//!
//! Both writers here implement [`MakeWriter`], so they plug straight into
//! `tracing_subscriber::fmt`. A writer holds its channel locked for the whole
//! event and closes the flush cycle when the event is done, so every tracing
//! event becomes exactly one prefixed line.
//!
//! ```rust,ignore
//! use arraylog::{ChannelId, subscriber::GlobalWriter};
//!
//! tracing_subscriber::fmt()
//!     .with_writer(GlobalWriter(ChannelId::Debug))
//!     .init();
//!
//! tracing::debug!("computing delta");
//! ```

use crate::{
    Channel, ChannelId,
    global::{self, State},
};
use std::{
    io,
    sync::{Mutex, MutexGuard, PoisonError},
};
use tracing_subscriber::fmt::MakeWriter;

/// A channel that can be shared with a tracing subscriber.
#[derive(Debug)]
pub struct SharedChannel<W: io::Write, const N: usize>(Mutex<Channel<W, N>>);

impl<W: io::Write, const N: usize> SharedChannel<W, N> {
    /// Create a new instance of [`SharedChannel`].
    ///
    /// # Arguments
    ///
    /// * `channel` - Channel that receives tracing events.
    pub fn new(channel: Channel<W, N>) -> Self {
        Self(Mutex::new(channel))
    }

    /// Lock the channel for direct use.
    pub fn lock(&self) -> MutexGuard<'_, Channel<W, N>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take the channel back.
    pub fn into_inner(self) -> Channel<W, N> {
        self.0.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Writer for a single tracing event against a [`SharedChannel`].
#[derive(Debug)]
pub struct EventWriter<'a, W: io::Write, const N: usize>(MutexGuard<'a, Channel<W, N>>);

impl<W: io::Write, const N: usize> io::Write for EventWriter<'_, W, N> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)?;
        Ok(buf.len())
    }

    // Cycle is closed when the event is done, not when the formatter asks.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<W: io::Write, const N: usize> Drop for EventWriter<'_, W, N> {
    fn drop(&mut self) {
        let _ = self.0.flush();
    }
}

impl<'a, W: io::Write + 'a, const N: usize> MakeWriter<'a> for SharedChannel<W, N> {
    type Writer = EventWriter<'a, W, N>;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter(self.lock())
    }
}

/// Routes tracing events into a channel of the [`global`] logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalWriter(pub ChannelId);

/// Writer for a single tracing event against the [`global`] logger.
#[derive(Debug)]
pub struct GlobalEventWriter {
    id: ChannelId,
    state: MutexGuard<'static, State>,
}

impl io::Write for GlobalEventWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        global::with_locked_channel(&mut self.state, self.id, |channel| channel.write(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for GlobalEventWriter {
    fn drop(&mut self) {
        let _ = global::with_locked_channel(&mut self.state, self.id, |channel| channel.flush());
    }
}

impl<'a> MakeWriter<'a> for GlobalWriter {
    type Writer = GlobalEventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        GlobalEventWriter {
            id: self.0,
            state: global::lock(),
        }
    }
}
