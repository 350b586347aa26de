//! Lifecycle of the process-wide logger.
//!
//! Global state is shared by every test in this binary, so the whole
//! lifecycle is walked through in a single test.

use arraylog::{ChannelId, Error, LoggerConfig, global};
use std::io::Write;

#[test]
fn lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    // Explicit initialization happens once.
    let guard = global::init(LoggerConfig::default())?;
    assert!(matches!(
        global::init(LoggerConfig::default()),
        Err(Error::AlreadyInitialized)
    ));

    // Both channels are single shared instances.
    global::write(ChannelId::Info, b"creating stream")?;
    global::with_channel(ChannelId::Info, |info| {
        assert_eq!(info.buffered(), if info.is_enabled() { 15 } else { 0 });
        writeln!(info)
    })?;
    global::flush(ChannelId::Info)?;
    global::with_channel(ChannelId::Info, |info| assert_eq!(info.buffered(), 0));

    // Left open, closed by shutdown.
    global::write(ChannelId::Debug, b"still buffered\n")?;
    assert!(!global::is_closed());

    drop(guard);
    assert!(global::is_closed());

    // Closed logger discards everything and cannot come back.
    global::write(ChannelId::Debug, &[b'x'; 100])?;
    global::with_channel(ChannelId::Debug, |debug| {
        assert!(!debug.is_enabled());
        assert_eq!(debug.buffered(), 0);
    });
    global::shutdown()?;
    assert!(matches!(
        global::init(LoggerConfig::default()),
        Err(Error::AlreadyInitialized)
    ));

    Ok(())
}
