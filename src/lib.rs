//! # Arraylog
//!
//! Arraylog writes tagged diagnostic lines to an output stream without allocating
//! on the write path.
//!
//! ## Layers
//!
//! * [`ArrayBuf`] batches bytes in a fixed capacity array that lives in place.
//!   It hands the whole array to the sink in one write when it overflows.
//! * [`Prefixed`] wraps any [`Buffer`] and emits a constant prefix once per
//!   flush cycle, no matter how many times the wrapped buffer overflowed.
//! * [`VecBuf`] is the allocating counterpart of [`ArrayBuf`]. It grows to
//!   hold a whole cycle and hands it to the sink in one write on flush.
//! * [`NullBuf`] discards everything. It replaces the whole stack when logging
//!   is disabled.
//! * [`Channel`] puts these together behind a name, and [`Logger`] holds one
//!   channel per [`ChannelId`]. The [`global`] module keeps a process-wide
//!   logger on standard error.
//!
//! ```
//! use arraylog::{Channel, ChannelId, LoggerConfig};
//! use std::io::Write;
//!
//! let mut sink = Vec::new();
//! let enabled = {
//!     let config = LoggerConfig::default();
//!     let mut info = Channel::<_, 42>::new(ChannelId::Info, &mut sink, &config);
//!     writeln!(info, "creating stream")?;
//!     info.flush()?;
//!     info.is_enabled()
//! };
//!
//! if enabled {
//!     assert_eq!(sink, b"[info]: creating stream\n");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! * `disable-logging` - Every channel discards its input, call sites stay the same.
//! * `tracing` - Writers that route [`tracing`](https://docs.rs/tracing/latest/tracing/)
//!   events into channels.
//!
//! There is a blanket implementation of [`Record`] for supported types from popular crates,
//! so their raw bytes can be appended to a channel. This can be activated with one of the
//! feature flags below. Note only one of the features can be enabled, not both.
//!
//! * `zerocopy` - For types that implement supported traits from [`zerocopy`](https://docs.rs/zerocopy/latest/zerocopy/)
//! * `bytemuck` - For types that implement supported traits from [`bytemuck`](https://docs.rs/bytemuck/latest/bytemuck/)

pub(crate) mod buffer;
pub(crate) mod channel;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod logger;
pub(crate) mod prefix;
pub(crate) mod record;

pub mod global;

#[cfg(feature = "tracing")]
pub mod subscriber;

#[cfg(test)]
pub(crate) mod oracle;

// Externally exposed types.
pub use buffer::{ArrayBuf, Buffer, NullBuf, VecBuf};
pub use channel::{Channel, ChannelId};
pub use config::{ErrorPolicy, LoggerConfig};
pub use error::Error;
pub use logger::Logger;
pub use prefix::Prefixed;
pub use record::Record;
