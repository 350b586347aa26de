//! Definition of errors surfaced by channels and the global facade.

use std::io;
use thiserror::Error;

/// Different types of error that can happen when writing to a channel.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Sink of channel {0} failed: {1}")]
    Sink(&'static str, #[source] io::Error),

    #[error("Global logger was already initialized")]
    AlreadyInitialized,
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        match error {
            // Hand back the sink's own error untouched.
            Error::Sink(_, source) => source,
            Error::AlreadyInitialized => io::Error::other(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_error_converts_to_source() {
        let error = Error::Sink("info", io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(error.to_string(), "Sink of channel info failed: closed");

        let source: io::Error = error.into();
        assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
    }
}
