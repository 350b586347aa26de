//! Process-wide logger writing to standard error.
//!
//! The global logger goes through three states:
//!
//! * Uninitialized until [`init`] is called or a channel is first used, in
//!   which case it is built with [`LoggerConfig::default`].
//! * Live, with a single shared instance of every channel.
//! * Closed after [`shutdown`], which flushes every open cycle exactly once.
//!   Writes after that are discarded.
//!
//! Rust never runs destructors of statics, so hold on to the [`Guard`]
//! returned by [`init`] (or call [`shutdown`]) to get the final flush.
//!
//! Every call locks the logger for its whole duration. Do not use the global
//! logger from inside a [`with_channel`] closure, it will deadlock.

use crate::{Channel, ChannelId, Error, Logger, LoggerConfig};
use std::{
    io,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Capacity of every global channel, in bytes.
pub const GLOBAL_CAPACITY: usize = 42;

/// Type alias for the logger behind the global facade.
pub type GlobalLogger = Logger<io::Stderr, GLOBAL_CAPACITY>;

/// Type alias for a channel of the global logger.
pub type GlobalChannel = Channel<io::Stderr, GLOBAL_CAPACITY>;

#[derive(Debug)]
pub(crate) enum State {
    Uninit,
    Live(GlobalLogger),
    Closed,
}

static GLOBAL: Mutex<State> = Mutex::new(State::Uninit);

/// Lock the global logger.
///
/// A panic while logging leaves channel state consistent, so poisoning is ignored.
pub(crate) fn lock() -> MutexGuard<'static, State> {
    GLOBAL.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Build the global logger with an explicit configuration.
///
/// Returns [`Error::AlreadyInitialized`] if the logger is already live
/// (explicitly or through first use) or has been shut down.
///
/// # Arguments
///
/// * `config` - Configuration of all global channels.
pub fn init(config: LoggerConfig) -> Result<Guard, Error> {
    let mut state = lock();
    let State::Uninit = *state else {
        return Err(Error::AlreadyInitialized);
    };

    *state = State::Live(Logger::with_sinks(|_| io::stderr(), config));
    Ok(Guard(()))
}

/// Run a closure against a global channel.
///
/// # Note
///
/// Statics are never dropped. Bytes still buffered at exit are lost unless
/// [`shutdown`] runs first, either directly or through the [`Guard`] from
/// [`init`]. This matters most when the logger was built on first use.
///
/// # Arguments
///
/// * `id` - Channel to use.
/// * `f` - Closure that receives the channel.
pub fn with_channel<R>(id: ChannelId, f: impl FnOnce(&mut GlobalChannel) -> R) -> R {
    with_locked_channel(&mut lock(), id, f)
}

pub(crate) fn with_locked_channel<R>(
    state: &mut State,
    id: ChannelId,
    f: impl FnOnce(&mut GlobalChannel) -> R,
) -> R {
    // First use builds the logger with defaults.
    if let State::Uninit = state {
        *state = State::Live(Logger::with_sinks(|_| io::stderr(), LoggerConfig::default()));
    }

    match state {
        State::Live(logger) => f(logger.channel(id)),
        State::Uninit | State::Closed => f(&mut Channel::disabled(id)),
    }
}

/// Append bytes to the current flush cycle of a global channel.
///
/// # Note
///
/// Statics are never dropped. Bytes still buffered at exit are lost unless
/// [`shutdown`] runs first, either directly or through the [`Guard`] from
/// [`init`]. This matters most when the logger was built on first use.
///
/// # Arguments
///
/// * `id` - Channel to write to.
/// * `bytes` - Bytes to append.
pub fn write(id: ChannelId, bytes: &[u8]) -> Result<(), Error> {
    with_channel(id, |channel| channel.write(bytes))
}

/// Close the current flush cycle of a global channel.
///
/// # Note
///
/// Statics are never dropped. Bytes still buffered at exit are lost unless
/// [`shutdown`] runs first, either directly or through the [`Guard`] from
/// [`init`]. This matters most when the logger was built on first use.
///
/// # Arguments
///
/// * `id` - Channel to flush.
pub fn flush(id: ChannelId) -> Result<(), Error> {
    with_channel(id, |channel| channel.flush())
}

/// true if the global logger has been shut down.
pub fn is_closed() -> bool {
    matches!(*lock(), State::Closed)
}

/// Flush every global channel and close the global logger.
///
/// Only the first call does any work. Channels that were never written to
/// stay silent.
pub fn shutdown() -> Result<(), Error> {
    let previous = std::mem::replace(&mut *lock(), State::Closed);
    let State::Live(mut logger) = previous else {
        return Ok(());
    };

    // Drain outside the lock, dropping the logger finds nothing left to flush.
    logger.flush_all()
}

/// Shuts the global logger down when dropped.
#[derive(Debug)]
#[must_use = "dropping the guard immediately shuts the global logger down"]
pub struct Guard(());

impl Drop for Guard {
    fn drop(&mut self) {
        let _ = shutdown();
    }
}
