//! Stream abstraction — any byte-oriented channel.
//!
//! Concrete implementations live outside this crate:
//! - UART serial (hardware or software)
//! - USB CDC
//! - TCP socket (for host-side testing against a networked bridge)
//!
//! The marshaling layer is generic over `Stream`, so adding a new channel
//! requires zero changes to the tag or marshal logic.
//!
//! The contract is blocking: a conforming stream waits until it can move
//! bytes or fails terminally. A return count lower than requested is a
//! legal result and is surfaced by the marshaler as a short-I/O error —
//! this layer never retries. A stream instance is single-owner; no
//! locking is performed here.

use core::fmt;

use alloc::collections::VecDeque;

/// Terminal failure of the underlying link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The link has been closed or was never opened.
    Closed,
    /// A device-specific fault, described statically.
    Device(&'static str),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "link closed"),
            Self::Device(msg) => write!(f, "device fault: {msg}"),
        }
    }
}

/// Byte-oriented stream channel.
pub trait Stream {
    /// Open the channel at the given speed (baud rate for serial links).
    fn open(&mut self, speed: u32) -> Result<(), LinkError>;

    /// Number of bytes currently buffered for reading.
    fn available(&self) -> usize;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns the number of bytes actually read.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, LinkError>;

    /// Write `data` to the channel.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, LinkError>;
}

/// An in-memory loopback stream: reads drain what writes queued.
///
/// Stands in for a serial port in tests and on the host side of a
/// simulated link. An optional write limit lets tests exercise the
/// short-write path.
pub struct MemoryStream {
    queue: VecDeque<u8>,
    write_budget: Option<usize>,
}

impl MemoryStream {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            write_budget: None,
        }
    }

    /// A stream that accepts at most `limit` bytes in total, then
    /// reports short writes.
    pub fn with_write_limit(limit: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            write_budget: Some(limit),
        }
    }

    /// The queued bytes, in write order, without consuming them.
    pub fn as_bytes(&mut self) -> &[u8] {
        self.queue.make_contiguous()
    }

    /// Drop any queued bytes.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl Default for MemoryStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream for MemoryStream {
    fn open(&mut self, _speed: u32) -> Result<(), LinkError> {
        Ok(())
    }

    fn available(&self) -> usize {
        self.queue.len()
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, LinkError> {
        let n = buf.len().min(self.queue.len());
        for slot in &mut buf[..n] {
            if let Some(b) = self.queue.pop_front() {
                *slot = b;
            }
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, LinkError> {
        let n = match self.write_budget {
            Some(budget) => data.len().min(budget),
            None => data.len(),
        };
        self.queue.extend(data[..n].iter().copied());
        if let Some(budget) = &mut self.write_budget {
            *budget -= n;
        }
        Ok(n)
    }
}

// ── Tests ────────────────────────────────────────────────────
