//! Immutable code-point buffer over the input text.
//!
//! The parser addresses the source by absolute code-point offset, not byte
//! offset, so multi-byte characters count as one position. The buffer keeps a
//! char-index to byte-offset table so the regex matchers can borrow an
//! anchored `&str` tail without re-scanning the text.

use std::ops::Range;

/// The source text as a random-access sequence of code points.
///
/// Created once per parse and never mutated; offsets handed out by the
/// matchers stay valid for the buffer's lifetime.
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    text: String,
    chars: Vec<char>,
    /// Byte offset of each code point, plus a trailing sentinel at `text.len()`.
    byte_starts: Vec<usize>,
}

impl SourceBuffer {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut byte_starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        byte_starts.push(text.len());
        SourceBuffer {
            text: text.to_string(),
            chars,
            byte_starts,
        }
    }

    /// Number of code points in the buffer.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Code point at an absolute offset, if in bounds.
    pub fn get(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// The remaining text starting at a code-point offset.
    ///
    /// Offsets at or past the end yield the empty tail.
    pub fn tail(&self, offset: usize) -> &str {
        let byte = self.byte_starts[offset.min(self.chars.len())];
        &self.text[byte..]
    }

    /// The text covered by a code-point span.
    pub fn slice(&self, span: &Range<usize>) -> &str {
        let start = self.byte_starts[span.start.min(self.chars.len())];
        let end = self.byte_starts[span.end.min(self.chars.len())];
        &self.text[start..end]
    }
}
