//! Pluggable byte sources feeding the tokenizer.
//!
//! The refill logic needs two read shapes: a bulk pull of whatever is
//! available, and a blocking single-byte read that settles whether the
//! stream is actually finished. Splitting them into separate trait methods
//! keeps the interactive fallback testable with a scripted source instead
//! of a real terminal.

use std::io::{self, Read};

/// A readable byte stream, in the two shapes the buffered reader needs.
///
/// Implementations are synchronous; both methods may block. A source is
/// borrowed by the tokenizer and never closed by it.
pub trait ByteSource {
    /// Pull whatever the source can deliver in one read, up to `buf.len()`
    /// bytes, written to the front of `buf`.
    ///
    /// # Contract
    ///
    /// `Ok(0)` means "this call delivered nothing" and must never be taken
    /// as end-of-stream on its own: an interactive source may simply have
    /// nothing queued yet. End-of-stream is decided only by
    /// [`read_byte`](Self::read_byte).
    fn read_available(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Block until one byte arrives or the stream ends.
    ///
    /// # Contract
    ///
    /// `Ok(None)` means the stream is genuinely finished. A finished source
    /// should keep reporting `Ok(None)` on further calls; consumers may poll
    /// past the end.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Adapter exposing any [`std::io::Read`] as a [`ByteSource`].
///
/// Blocking readers only return 0 bytes at true end-of-stream, so for these
/// sources the single-byte fallback settles immediately after an empty bulk
/// read. Sources that can report "nothing available yet" without being
/// finished should implement [`ByteSource`] directly instead.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
}

impl<R: Read> ReaderSource<R> {
    /// Wrap a reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Unwrap, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_available(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.inner.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, reason = "test assertions use expect for clarity")]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn bulk_read_delivers_available_bytes() {
        let mut source = ReaderSource::new(Cursor::new(b"abc".to_vec()));
        let mut buf = [0u8; 8];
        let n = source.read_available(&mut buf).expect("in-memory read");
        assert_eq!(&buf[..n], b"abc");
    }

    #[test]
    fn read_byte_walks_the_stream_then_stays_finished() {
        let mut source = ReaderSource::new(Cursor::new(b"hi".to_vec()));
        assert_eq!(source.read_byte().expect("read"), Some(b'h'));
        assert_eq!(source.read_byte().expect("read"), Some(b'i'));
        assert_eq!(source.read_byte().expect("read"), None);
        assert_eq!(source.read_byte().expect("read"), None);
    }

    #[test]
    fn bulk_read_reports_zero_at_end() {
        let mut source = ReaderSource::new(Cursor::new(Vec::new()));
        let mut buf = [0u8; 4];
        assert_eq!(source.read_available(&mut buf).expect("read"), 0);
        assert_eq!(source.read_byte().expect("read"), None);
    }

    #[test]
    fn into_inner_returns_the_reader() {
        let source = ReaderSource::new(Cursor::new(b"xyz".to_vec()));
        assert_eq!(source.into_inner().into_inner(), b"xyz");
    }
}
