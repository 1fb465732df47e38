//! Byte classification behind the tokenizer's delimiter policy.
//!
//! Classification is a 256-entry array lookup, one entry per possible byte
//! value, rather than membership tests against the configured sets. This
//! keeps the per-byte decision O(1) regardless of how many delimiters are
//! configured, and makes the conflict rule mechanical: the single-char set
//! is applied after the whitespace set and overwrites it.

/// Bytes classified as whitespace by the default table: space, tab,
/// carriage return, line feed.
pub const DEFAULT_WHITESPACE: &[u8] = b" \t\r\n";

/// Role of a single byte under the current delimiter policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ByteClass {
    /// Accumulates into a multi-byte token.
    Ordinary,
    /// Separates tokens; consumed and skipped, never returned.
    Whitespace,
    /// Emitted alone as a one-byte token, even with no whitespace around it.
    SingleChar,
}

impl ByteClass {
    /// Returns `true` for the classes that terminate an ordinary run.
    #[inline]
    pub fn is_delimiter(self) -> bool {
        !matches!(self, ByteClass::Ordinary)
    }
}

/// Byte-indexed classification table.
///
/// The default table marks [`DEFAULT_WHITESPACE`] as whitespace, nothing as
/// a single-char token, and everything else as ordinary.
///
/// # Precedence
///
/// [`set_delimiters`](Self::set_delimiters) replaces the whole table; there
/// are no incremental edits. A byte named in both sets ends up classified
/// [`ByteClass::SingleChar`], and membership reconstruction reports it only
/// in the single-char set.
#[derive(Clone, PartialEq, Eq)]
pub struct DelimiterTable {
    classes: [ByteClass; 256],
}

/// Size assertion: one byte per entry, nothing else.
const _: () = assert!(std::mem::size_of::<DelimiterTable>() == 256);

impl DelimiterTable {
    /// Create a table with the default policy.
    pub fn new() -> Self {
        let mut table = Self {
            classes: [ByteClass::Ordinary; 256],
        };
        table.set_delimiters(DEFAULT_WHITESPACE, b"");
        table
    }

    /// Replace the entire classification.
    ///
    /// Every byte in `whitespace` becomes [`ByteClass::Whitespace`], every
    /// byte in `single_char_tokens` becomes [`ByteClass::SingleChar`], and
    /// every other byte becomes [`ByteClass::Ordinary`]. Empty sets are
    /// accepted; with no single-char tokens configured, only whitespace
    /// separated words are ever produced.
    pub fn set_delimiters(&mut self, whitespace: &[u8], single_char_tokens: &[u8]) {
        self.classes = [ByteClass::Ordinary; 256];
        for &byte in whitespace {
            self.classes[byte as usize] = ByteClass::Whitespace;
        }
        // Applied second: wins over whitespace when a byte is in both sets.
        for &byte in single_char_tokens {
            self.classes[byte as usize] = ByteClass::SingleChar;
        }
    }

    /// Classification of `byte` under the current policy.
    #[inline]
    pub fn classify(&self, byte: u8) -> ByteClass {
        self.classes[byte as usize]
    }

    /// Current whitespace membership, in ascending byte order.
    pub fn whitespace(&self) -> Vec<u8> {
        self.members(ByteClass::Whitespace)
    }

    /// Current single-char-token membership, in ascending byte order.
    pub fn single_char_tokens(&self) -> Vec<u8> {
        self.members(ByteClass::SingleChar)
    }

    /// Scan the table and collect the bytes currently mapped to `class`.
    fn members(&self, class: ByteClass) -> Vec<u8> {
        (0..=u8::MAX)
            .filter(|&byte| self.classes[byte as usize] == class)
            .collect()
    }
}

impl Default for DelimiterTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DelimiterTable {
    /// Renders the reconstructed membership sets instead of 256 raw entries.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelimiterTable")
            .field("whitespace", &self.whitespace().escape_ascii().to_string())
            .field(
                "single_char_tokens",
                &self.single_char_tokens().escape_ascii().to_string(),
            )
            .finish()
    }
}
