//! Lexical acceptors: anchored regex patterns and literal matching.
//!
//! All patterns are compiled once and anchored with `^`, so a match is a
//! "starts exactly at the cursor" test, never a search ahead. The two
//! primitives either consume the full match and advance the cursor, or
//! consume nothing at all.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

use crate::fortran::cursor::CursorStack;
use crate::fortran::source::SourceBuffer;

/// Program and variable names: `[A-Za-z_][A-Za-z0-9_$]*`.
pub static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*").unwrap());

/// One or more horizontal whitespace characters.
pub static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t]+").unwrap());

/// One or more carriage-return/line-feed characters.
pub static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\r\n]+").unwrap());

/// `!` followed by the rest of the line.
pub static COMMENT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^![^\r\n]*").unwrap());

/// Possibly-empty string body: anything but an apostrophe or newline.
pub static UNQUOTED_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^'\r\n]*").unwrap());

/// Case-insensitive code-point comparison against the buffer at the cursor.
///
/// Advances the cursor past the literal on success; consumes nothing on
/// failure.
pub fn literal(source: &SourceBuffer, cursors: &mut CursorStack, text: &str) -> bool {
    let start = cursors.offset();
    let mut length = 0;
    for expected in text.chars() {
        match source.get(start + length) {
            Some(actual) if actual.to_lowercase().eq(expected.to_lowercase()) => length += 1,
            _ => return false,
        }
    }
    cursors.advance(length);
    true
}

/// Anchored pattern match at the cursor.
///
/// Returns the matched code-point span and advances the cursor to its end;
/// `None` if the pattern cannot match starting exactly at the cursor.
pub fn pattern(
    source: &SourceBuffer,
    cursors: &mut CursorStack,
    re: &Regex,
) -> Option<Range<usize>> {
    let start = cursors.offset();
    let matched = re.find(source.tail(start))?;
    debug_assert_eq!(matched.start(), 0, "lexical patterns must be ^-anchored");
    let length = matched.as_str().chars().count();
    cursors.advance(length);
    Some(start..start + length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(text: &str, offset: usize) -> (SourceBuffer, CursorStack) {
        let source = SourceBuffer::new(text);
        let mut cursors = CursorStack::new();
        cursors.set(offset);
        (source, cursors)
    }

    #[test]
    fn test_literal_is_case_insensitive() {
        let (source, mut cursors) = at("PRINT *, 'x'", 0);
        assert!(literal(&source, &mut cursors, "print"));
        assert_eq!(cursors.offset(), 5);
    }

    #[test]
    fn test_literal_failure_consumes_nothing() {
        let (source, mut cursors) = at("prin", 0);
        assert!(!literal(&source, &mut cursors, "print"));
        assert_eq!(cursors.offset(), 0);
    }

    #[test]
    fn test_pattern_is_anchored() {
        let (source, mut cursors) = at("ab  cd", 0);
        // Whitespace exists later in the input but not at the cursor.
        assert!(pattern(&source, &mut cursors, &WHITESPACE_RUN).is_none());
        assert_eq!(cursors.offset(), 0);
    }

    #[test]
    fn test_pattern_advances_past_match() {
        let (source, mut cursors) = at("  \tx", 0);
        let span = pattern(&source, &mut cursors, &WHITESPACE_RUN).unwrap();
        assert_eq!(span, 0..3);
        assert_eq!(cursors.offset(), 3);
    }

    #[test]
    fn test_pattern_matches_from_cursor_not_start() {
        let (source, mut cursors) = at("x! trailing comment", 1);
        let span = pattern(&source, &mut cursors, &COMMENT_LINE).unwrap();
        assert_eq!(span, 1..19);
        assert_eq!(source.slice(&span), "! trailing comment");
    }

    #[test]
    fn test_unquoted_run_may_be_empty() {
        let (source, mut cursors) = at("''", 1);
        let span = pattern(&source, &mut cursors, &UNQUOTED_RUN).unwrap();
        assert_eq!(span, 1..1);
        assert_eq!(cursors.offset(), 1);
    }

    #[test]
    fn test_identifier_pattern() {
        let (source, mut cursors) = at("foo_bar$2 rest", 0);
        let span = pattern(&source, &mut cursors, &IDENTIFIER).unwrap();
        assert_eq!(source.slice(&span), "foo_bar$2");
    }
}
