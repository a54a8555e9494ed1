//! Byte → character offset conversion.
//!
//! Matches, segments and resolver decisions all use UTF-8 byte offsets, which
//! is what `regex` reports. Consumers that count characters (a JSON client
//! painting spans, an editor) need the character form:
//!
//! ```text
//! text:   "Gaia – DR3"
//!          G a i a   [ – ]   D R 3
//! byte:    0 1 2 3 4 5 6 7 8 9 10 11
//! char:    0 1 2 3 4   5     6 7 8  9
//!                      └ 3 bytes, 1 char
//! ```
//!
//! [`SpanConverter`] builds the table once per text unit; ASCII text skips it.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A span in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharSpan {
    /// Character offset (start, inclusive)
    pub char_start: usize,
    /// Character offset (end, exclusive)
    pub char_end: usize,
}

impl CharSpan {
    /// Length in characters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.char_end.saturating_sub(self.char_start)
    }

    /// Whether the span covers no characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.char_end <= self.char_start
    }
}

/// Converts byte offsets within one text unit into character offsets.
#[derive(Debug, Clone)]
pub struct SpanConverter {
    /// `char_starts[i]` is the byte offset of char `i`; empty for ASCII text.
    char_starts: Vec<usize>,
    byte_len: usize,
    char_len: usize,
}

impl SpanConverter {
    /// Build a converter for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        if text.is_ascii() {
            return Self {
                char_starts: Vec::new(),
                byte_len: text.len(),
                char_len: text.len(),
            };
        }
        let char_starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        Self {
            char_len: char_starts.len(),
            char_starts,
            byte_len: text.len(),
        }
    }

    /// Whether the text was pure ASCII (byte and char offsets coincide).
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.char_starts.is_empty()
    }

    /// Character offset of `byte`.
    ///
    /// A byte inside a multi-byte character maps to that character; offsets
    /// past the end clamp to the character length.
    #[must_use]
    pub fn byte_to_char(&self, byte: usize) -> usize {
        if byte >= self.byte_len {
            return self.char_len;
        }
        if self.is_identity() {
            return byte;
        }
        match self.char_starts.binary_search(&byte) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        }
    }

    /// Character span of a byte range.
    #[must_use]
    pub fn span(&self, bytes: Range<usize>) -> CharSpan {
        CharSpan {
            char_start: self.byte_to_char(bytes.start),
            char_end: self.byte_to_char(bytes.end),
        }
    }
}
