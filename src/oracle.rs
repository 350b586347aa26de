//! Reference implementations used to test channels.

use std::{
    io,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// A sink that remembers every write and flush it receives.
///
/// Clones share the same recording, so tests can hand one clone to a buffer
/// and inspect the other.
#[derive(Debug, Default, Clone)]
pub(crate) struct Recorder(Arc<Mutex<Recording>>);

#[derive(Debug, Default)]
struct Recording {
    chunks: Vec<Vec<u8>>,
    flushes: usize,
    failing: bool,

    // Writes left to reject before the sink recovers on its own.
    rejects: usize,
}

impl Recorder {
    /// A recorder whose writes always fail.
    pub(crate) fn failing() -> Self {
        let recorder = Self::default();
        recorder.lock().failing = true;
        recorder
    }

    /// A recorder that rejects the next `count` writes, then recovers.
    pub(crate) fn failing_writes(count: usize) -> Self {
        let recorder = Self::default();
        recorder.lock().rejects = count;
        recorder
    }

    /// Every write received, in order.
    pub(crate) fn chunks(&self) -> Vec<Vec<u8>> {
        self.lock().chunks.clone()
    }

    /// Every byte received, in order.
    pub(crate) fn output(&self) -> Vec<u8> {
        self.lock().chunks.concat()
    }

    /// Number of flush requests received.
    pub(crate) fn flushes(&self) -> usize {
        self.lock().flushes
    }

    /// Make subsequent writes fail or succeed.
    pub(crate) fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl io::Write for Recorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut recording = self.lock();
        if recording.rejects > 0 {
            recording.rejects -= 1;
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }

        if recording.failing {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }

        recording.chunks.push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flushes += 1;
        Ok(())
    }
}

/// Reference model of a prefixed channel using standard library primitives.
///
/// Tracks whole flush cycles rather than physical buffer overflows, which is
/// all a reader of the sink can tell apart once a cycle is closed.
#[derive(Debug)]
pub(crate) struct Oracle {
    prefix: &'static [u8],
    cycle: Vec<u8>,
    output: Vec<u8>,
}

impl Oracle {
    pub(crate) fn new(prefix: &'static [u8]) -> Self {
        Self {
            prefix,
            cycle: Vec::new(),
            output: Vec::new(),
        }
    }

    pub(crate) fn write(&mut self, bytes: &[u8]) {
        self.cycle.extend_from_slice(bytes);
    }

    pub(crate) fn flush(&mut self) {
        self.output.extend_from_slice(self.prefix);
        self.output.append(&mut self.cycle);
    }

    /// Output expected once the channel has been dropped.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        if !self.cycle.is_empty() {
            self.flush();
        }

        self.output
    }

    pub(crate) fn output(&self) -> &[u8] {
        &self.output
    }
}
