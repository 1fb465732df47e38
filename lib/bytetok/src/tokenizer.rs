//! The streaming tokenizer: scanning loop, putback, and position tracking.
//!
//! A token request drains the putback stack first; only when it is empty are
//! bytes pulled through the internal buffer and classified one at a time.
//! Whitespace is consumed and skipped, a single-char byte is emitted alone,
//! and an ordinary byte opens a run that accumulates until the next byte is
//! a delimiter or the stream ends. The terminating delimiter itself is left
//! unconsumed for the following request.
//!
//! Line counting is tied to consumption: every `\n` byte pulled from the
//! stream bumps the counter, whatever its current classification. Putback
//! replays and pure lookahead never touch it.

use std::io;

use crate::delimiters::{ByteClass, DelimiterTable};
use crate::source::ByteSource;
use crate::stream_buffer::{StreamBuffer, DEFAULT_BUFFER_CAPACITY};

/// Streaming tokenizer over an exclusively borrowed byte source.
///
/// Move-only by construction: the buffer, source binding, and putback stack
/// have no meaningful duplicate. The source outlives the tokenizer's use of
/// it and is never closed here.
///
/// Created unbound via [`new`](Self::new) or bound via
/// [`with_source`](Self::with_source); [`set_source`](Self::set_source)
/// rebinds. An unbound tokenizer still serves its putback stack and then
/// reports exhaustion.
pub struct Tokenizer<'a> {
    source: Option<&'a mut dyn ByteSource>,
    stream_name: String,
    table: DelimiterTable,
    buffer: StreamBuffer,
    putback: Vec<Vec<u8>>,
    line_number: u64,
}

impl<'a> Tokenizer<'a> {
    /// Create an unbound tokenizer with the default delimiter table, the
    /// default buffer capacity, and the line counter at zero.
    pub fn new() -> Self {
        Self {
            source: None,
            stream_name: String::new(),
            table: DelimiterTable::new(),
            buffer: StreamBuffer::new(DEFAULT_BUFFER_CAPACITY),
            putback: Vec::new(),
            line_number: 0,
        }
    }

    /// Create a tokenizer bound to `source`.
    pub fn with_source(source: &'a mut dyn ByteSource) -> Self {
        let mut tokenizer = Self::new();
        tokenizer.source = Some(source);
        tokenizer
    }

    /// Return the next token, or `Ok(None)` once the stream is exhausted.
    ///
    /// Pending putback entries are returned first, most recent first,
    /// verbatim and without reclassification. Exhaustion is the normal
    /// loop-termination signal, not an error; only genuine I/O faults
    /// surface as `Err`.
    pub fn next_token(&mut self) -> io::Result<Option<Vec<u8>>> {
        if let Some(token) = self.putback.pop() {
            return Ok(Some(token));
        }

        // Skip separators until a token byte or end-of-stream.
        let first = loop {
            let Some(byte) = self.pull_byte()? else {
                return Ok(None);
            };
            match self.table.classify(byte) {
                ByteClass::Whitespace => {}
                ByteClass::SingleChar => return Ok(Some(vec![byte])),
                ByteClass::Ordinary => break byte,
            }
        };

        // Accumulate the ordinary run. The byte that terminates it stays
        // unconsumed so the next request starts exactly there.
        let mut token = vec![first];
        loop {
            match self.peek_byte()? {
                Some(byte) if !self.table.classify(byte).is_delimiter() => {
                    let consumed = self.pull_byte()?;
                    debug_assert_eq!(consumed, Some(byte), "peeked byte must be served next");
                    token.push(byte);
                }
                _ => break,
            }
        }
        Ok(Some(token))
    }

    /// Look at the next raw stream byte without consuming it.
    ///
    /// `Ok(None)` is the end-of-stream sentinel. This is a pure lookahead
    /// into the stream position, independent of token boundaries: it ignores
    /// the putback stack and never moves the line counter.
    pub fn peek_next_char(&mut self) -> io::Result<Option<u8>> {
        self.peek_byte()
    }

    /// Push `token` onto the putback stack.
    ///
    /// The next [`next_token`](Self::next_token) call returns it unchanged.
    /// Any token is accepted, including ones never produced by this
    /// tokenizer; entries replay in LIFO order.
    pub fn putback_token(&mut self, token: Vec<u8>) {
        self.putback.push(token);
    }

    /// Current line number.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Reset the line counter, e.g. when a caller splices streams.
    pub fn set_line_number(&mut self, line: u64) {
        self.line_number = line;
    }

    /// Diagnostic label for the bound stream. Never interpreted.
    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }

    /// Set the diagnostic label for the bound stream.
    pub fn set_stream_name(&mut self, name: impl Into<String>) {
        self.stream_name = name.into();
    }

    /// Replace the delimiter policy. Takes effect on the next pull;
    /// already-buffered bytes are reclassified under the new table.
    pub fn set_delimiters(&mut self, whitespace: &[u8], single_char_tokens: &[u8]) {
        self.table.set_delimiters(whitespace, single_char_tokens);
    }

    /// Current whitespace membership, in ascending byte order.
    pub fn whitespace(&self) -> Vec<u8> {
        self.table.whitespace()
    }

    /// Current single-char-token membership, in ascending byte order.
    pub fn single_char_tokens(&self) -> Vec<u8> {
        self.table.single_char_tokens()
    }

    /// The delimiter table currently in effect.
    pub fn delimiters(&self) -> &DelimiterTable {
        &self.table
    }

    /// Configured buffer capacity in bytes.
    pub fn buffer_capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Change the buffer capacity. Zero disables buffering: every byte is
    /// then read directly from the source. Unconsumed buffered bytes are
    /// carried over, never dropped.
    pub fn set_buffer_size(&mut self, capacity: usize) {
        self.buffer.set_capacity(capacity);
    }

    /// Bind a new source, dropping any bytes buffered from the old one.
    ///
    /// The putback stack and line number deliberately survive a rebind;
    /// callers reset them explicitly when they want a clean slate.
    pub fn set_source(&mut self, source: &'a mut dyn ByteSource) {
        tracing::debug!(stream = %self.stream_name, "rebinding tokenizer source");
        self.buffer.reset();
        self.source = Some(source);
    }

    /// Iterator adapter over [`next_token`](Self::next_token).
    ///
    /// Yields `io::Result<Vec<u8>>` items and ends on exhaustion.
    pub fn tokens(&mut self) -> Tokens<'_, 'a> {
        Tokens { tokenizer: self }
    }

    /// Consume one byte from the buffered stream, counting newlines.
    fn pull_byte(&mut self) -> io::Result<Option<u8>> {
        let Some(source) = self.source.as_deref_mut() else {
            return Ok(None);
        };
        let byte = self.buffer.next_byte(source)?;
        if byte == Some(b'\n') {
            self.line_number += 1;
        }
        Ok(byte)
    }

    /// Look at the next stream byte without consuming it.
    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        let Some(source) = self.source.as_deref_mut() else {
            return Ok(None);
        };
        self.buffer.peek_byte(source)
    }
}

impl Default for Tokenizer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Tokenizer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("stream_name", &self.stream_name)
            .field("bound", &self.source.is_some())
            .field("table", &self.table)
            .field("buffer_capacity", &self.buffer.capacity())
            .field("putback_depth", &self.putback.len())
            .field("line_number", &self.line_number)
            .finish()
    }
}

/// Iterator over a tokenizer's remaining tokens.
///
/// Returned by [`Tokenizer::tokens`]. Ends on exhaustion; an I/O fault is
/// yielded as an `Err` item and the iterator can be polled again after the
/// caller rebinds a healthy source.
pub struct Tokens<'t, 'a> {
    tokenizer: &'t mut Tokenizer<'a>,
}

impl Iterator for Tokens<'_, '_> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokenizer.next_token().transpose()
    }
}
