//! # Printer Transport Layer
//!
//! Where the engine's bytes go. Every command or line is handed over in one
//! [`Sink::write_all`] call, and a sink either takes all of it or fails.
//!
//! ## Available Sinks
//!
//! - [`device`]: raw device file (parallel port, USB printer class, serial TTY)
//! - [`WriteSink`]: any [`std::io::Write`], e.g. stdout or a spool file
//! - `Vec<u8>`: in-memory capture, used by tests

pub mod device;

use std::io::Write;

use crate::error::PinfeedError;

pub use device::DeviceTransport;

/// Destination for printer bytes.
pub trait Sink {
    /// Write the whole buffer or fail. Partial writes are errors.
    fn write_all(&mut self, data: &[u8]) -> Result<(), PinfeedError>;
}

impl Sink for Vec<u8> {
    fn write_all(&mut self, data: &[u8]) -> Result<(), PinfeedError> {
        self.extend_from_slice(data);
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write_all(&mut self, data: &[u8]) -> Result<(), PinfeedError> {
        (**self).write_all(data)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_all(&mut self, data: &[u8]) -> Result<(), PinfeedError> {
        (**self).write_all(data)
    }
}

/// Adapts an [`io::Write`](std::io::Write) into a [`Sink`].
///
/// Each buffer goes out in a single `write` call. Anything short of the
/// full length is reported as [`PinfeedError::ShortWrite`], without retry.
pub struct WriteSink<W> {
    inner: W,
}

impl<W: Write> WriteSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Sink for WriteSink<W> {
    fn write_all(&mut self, data: &[u8]) -> Result<(), PinfeedError> {
        if data.is_empty() {
            return Ok(());
        }
        let written = self.inner.write(data)?;
        if written != data.len() {
            return Err(PinfeedError::ShortWrite {
                written,
                expected: data.len(),
            });
        }
        self.inner.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Accepts at most `limit` bytes per write.
    struct Trickle {
        limit: usize,
        data: Vec<u8>,
    }

    impl Write for Trickle {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.limit);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<u8> = Vec::new();
        Sink::write_all(&mut sink, b"\x1b@").unwrap();
        Sink::write_all(&mut sink, b"\r\n").unwrap();
        assert_eq!(sink, b"\x1b@\r\n");
    }

    #[test]
    fn test_write_sink_passes_through() {
        let mut sink = WriteSink::new(Vec::new());
        sink.write_all(b"abc").unwrap();
        sink.write_all(b"").unwrap();
        assert_eq!(sink.into_inner(), b"abc");
    }

    #[test]
    fn test_short_write_is_fatal() {
        let mut sink = WriteSink::new(Trickle {
            limit: 2,
            data: Vec::new(),
        });
        let err = sink.write_all(b"abcd").unwrap_err();
        assert!(matches!(
            err,
            PinfeedError::ShortWrite {
                written: 2,
                expected: 4
            }
        ));
        assert_eq!(sink.into_inner().data, b"ab");
    }
}
