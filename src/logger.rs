//! Definition of a registry of named channels.

use crate::{Channel, ChannelId, Error, LoggerConfig};
use std::io;

/// A set of named channels built from one configuration.
///
/// Logger is an explicit handle, it can be owned by whoever needs it and
/// passed down. See [`global`](crate::global) for a process-wide instance.
/// Dropping the logger flushes every channel with an open cycle.
#[derive(Debug)]
pub struct Logger<W: io::Write, const N: usize> {
    config: LoggerConfig,
    info: Channel<W, N>,
    debug: Channel<W, N>,
}

impl<W: io::Write + Clone, const N: usize> Logger<W, N> {
    /// Create a new instance of [`Logger`] where all channels share a sink.
    ///
    /// # Panic
    ///
    /// * Panics if N == 0 and logging is enabled.
    ///
    /// # Arguments
    ///
    /// * `sink` - Destination of flushed bytes, cloned for every channel.
    /// * `config` - Configuration of all channels.
    #[track_caller]
    pub fn new(sink: W, config: LoggerConfig) -> Self {
        Self::with_sinks(|_| sink.clone(), config)
    }
}

impl<W: io::Write, const N: usize> Logger<W, N> {
    /// Create a new instance of [`Logger`] with a dedicated sink per channel.
    ///
    /// # Panic
    ///
    /// * Panics if N == 0 and logging is enabled.
    ///
    /// # Arguments
    ///
    /// * `sink` - Returns the sink of a channel.
    /// * `config` - Configuration of all channels.
    #[track_caller]
    pub fn with_sinks(mut sink: impl FnMut(ChannelId) -> W, config: LoggerConfig) -> Self {
        Self {
            info: Channel::new(ChannelId::Info, sink(ChannelId::Info), &config),
            debug: Channel::new(ChannelId::Debug, sink(ChannelId::Debug), &config),
            config,
        }
    }

    /// Configuration this logger was built with.
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// The `info` channel.
    pub fn info(&mut self) -> &mut Channel<W, N> {
        &mut self.info
    }

    /// The `debug` channel.
    pub fn debug(&mut self) -> &mut Channel<W, N> {
        &mut self.debug
    }

    /// Channel with the given name.
    pub fn channel(&mut self, id: ChannelId) -> &mut Channel<W, N> {
        match id {
            ChannelId::Info => &mut self.info,
            ChannelId::Debug => &mut self.debug,
        }
    }

    /// Flush every channel that holds buffered bytes.
    ///
    /// Channels with nothing buffered are left alone, so this never emits a
    /// bare prefix. All channels are visited even if one of them fails, the
    /// first failure is returned.
    pub fn flush_all(&mut self) -> Result<(), Error> {
        let mut result = Ok(());
        for id in ChannelId::ALL {
            let channel = self.channel(id);
            if channel.buffered() == 0 {
                continue;
            }

            let flushed = channel.flush();
            if result.is_ok() {
                result = flushed;
            }
        }

        result
    }
}
