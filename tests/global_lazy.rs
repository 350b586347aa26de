//! Process-wide logger built on first use rather than through `init`.

use arraylog::{ChannelId, Error, LoggerConfig, global};

#[test]
fn shutdown_drains_logger_built_on_first_use() -> Result<(), Error> {
    global::write(ChannelId::Debug, b"no init")?;
    global::with_channel(ChannelId::Debug, |debug| {
        assert_eq!(debug.buffered(), if debug.is_enabled() { 7 } else { 0 });
    });

    // First use counts as initialization.
    assert!(matches!(
        global::init(LoggerConfig::default()),
        Err(Error::AlreadyInitialized)
    ));

    // Without this the pending cycle would never leave the buffer.
    global::shutdown()?;
    assert!(global::is_closed());
    global::with_channel(ChannelId::Debug, |debug| {
        assert!(!debug.is_enabled());
        assert_eq!(debug.buffered(), 0);
    });
    Ok(())
}
