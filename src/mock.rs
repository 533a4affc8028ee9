//! In-memory stand-ins for a bound I2C device and a delay.

use eh1::delay::DelayNs;
use std::{
    collections::VecDeque,
    io::{self, Read, Write},
};

enum Response {
    Frame([u8; 4]),
    Short(usize),
    Fail,
}

/// Answers each read with the next queued response; once the queue is empty
/// every read fails.
pub(crate) struct MockChannel {
    responses: VecDeque<Response>,
    fail_write: bool,
    pub(crate) written: Vec<u8>,
    pub(crate) reads: usize,
}

impl MockChannel {
    pub(crate) fn new(frames: impl IntoIterator<Item = [u8; 4]>) -> Self {
        Self::from_responses(frames.into_iter().map(Response::Frame).collect())
    }
    pub(crate) fn with_short_read(len: usize) -> Self {
        Self::from_responses(VecDeque::from([Response::Short(len)]))
    }
    pub(crate) fn failing_read() -> Self {
        Self::from_responses(VecDeque::from([Response::Fail]))
    }
    pub(crate) fn failing_write() -> Self {
        MockChannel {
            fail_write: true,
            ..Self::from_responses(VecDeque::new())
        }
    }
    fn from_responses(responses: VecDeque<Response>) -> Self {
        MockChannel {
            responses,
            fail_write: false,
            written: Vec::new(),
            reads: 0,
        }
    }
}

impl Read for MockChannel {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        match self.responses.pop_front() {
            Some(Response::Frame(frame)) => {
                let len = frame.len().min(buf.len());
                buf[..len].copy_from_slice(&frame[..len]);
                Ok(len)
            }
            Some(Response::Short(len)) => {
                buf[..len].fill(0xAA);
                Ok(len)
            }
            Some(Response::Fail) | None => Err(io::Error::from_raw_os_error(nix::libc::EIO)),
        }
    }
}

impl Write for MockChannel {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_write {
            return Err(io::Error::from_raw_os_error(nix::libc::ENXIO));
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Records requested delays instead of sleeping.
#[derive(Debug, Default)]
pub(crate) struct RecordingDelay {
    pub(crate) ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.ms.push(ns / 1_000_000);
    }
    fn delay_ms(&mut self, ms: u32) {
        self.ms.push(ms);
    }
}
