//! Parser for a fixed-form Fortran subset.
//!
//! A hand-written recursive-descent parser with explicit backtracking. The
//! source text becomes an immutable code-point buffer; a stack of cursor
//! frames tracks nested speculative parse attempts; regex-driven acceptors
//! match anchored lexical shapes at the cursor; and grammar productions
//! compose their results bottom-up into an ordered [`TokenForest`].
//!
//! The grammar covers program blocks, `print`/`type` intrinsic calls,
//! string literals, comments, whitespace/newline layout, and fixed-form
//! continuation lines. Productions are ordered-choice: alternatives are
//! tried in a fixed priority order and the first success wins; a failing
//! production restores the cursor exactly to where it started.
//!
//! The top level is deliberately permissive: it takes as many consecutive
//! statements as exist and does not require consuming the entire buffer.
//! Trailing unrecognized input is silently left unparsed; only an input
//! with no recognizable statement at all is an error.

pub mod cursor;
pub mod error;
pub mod matchers;
pub mod parser;
pub mod source;
pub mod tokens;

pub use error::ParseError;
pub use parser::Parser;
pub use source::SourceBuffer;
pub use tokens::{PrimitiveKind, Token, TokenForest};

/// Parse a source text into a token forest.
///
/// Convenience wrapper constructing a [`Parser`] for one invocation.
pub fn parse(source: &str) -> Result<TokenForest, ParseError> {
    let mut parser = Parser::new(source);
    parser.parse()
}
