//! Streaming byte tokenizer with a configurable delimiter policy.
//!
//! [`Tokenizer`] splits an externally owned byte stream into tokens. Every
//! byte value is classified through a 256-entry [`DelimiterTable`] as either
//! ordinary (accumulates into a token), whitespace (separates tokens, never
//! returned), or a single-char token (always emitted alone, even when glued
//! to an ordinary run on both sides). Bytes are pulled through an internal
//! fixed-capacity buffer that refills from the source only when exhausted,
//! and previously returned tokens can be pushed back for unlimited
//! single-token backtracking.
//!
//! # Usage
//!
//! ```text
//! let mut input = ReaderSource::new(File::open("shapes.svg")?);
//! let mut tokens = Tokenizer::with_source(&mut input);
//! tokens.set_delimiters(b" \t\r\n", b"<>=/");
//!
//! while let Some(token) = tokens.next_token()? {
//!     handle(&token, tokens.line_number());
//! }
//! ```
//!
//! # Interactive Sources
//!
//! A bulk refill that returns zero bytes is not trusted as end-of-stream:
//! a line-buffered terminal may simply have nothing queued yet. The buffer
//! follows up with a blocking single-byte read, and only when that also
//! comes back empty is the stream truly finished. Sources plug in through
//! the [`ByteSource`] trait, so this fallback is fully testable without an
//! actual terminal; [`ReaderSource`] adapts any [`std::io::Read`].
//!
//! # Ownership
//!
//! The tokenizer borrows its source exclusively and never closes it. It is
//! a move-only type: the buffer, source binding, and putback stack have no
//! meaningful duplicate.

mod delimiters;
mod source;
mod stream_buffer;
mod tokenizer;

pub use delimiters::{ByteClass, DelimiterTable, DEFAULT_WHITESPACE};
pub use source::{ByteSource, ReaderSource};
pub use stream_buffer::DEFAULT_BUFFER_CAPACITY;
pub use tokenizer::{Tokenizer, Tokens};
