//! Errors produced by the grammar and the top-level parse.

use std::fmt;

/// Failure outcomes of grammar productions and of `parse()`.
///
/// `Expected` and `MissingTerminator` are always local and recoverable: the
/// failing production rolls its cursor back and the caller decides whether
/// to try an alternative. Only `NoStatements` is terminal, raised by the
/// top-level parse when nothing at all was recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required literal, pattern, or sub-production did not match.
    Expected(&'static str),
    /// An inner construct parsed but its required terminator was absent.
    MissingTerminator(&'static str),
    /// The whole input produced zero recognized statements.
    NoStatements,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Expected(what) => write!(f, "expected {}", what),
            ParseError::MissingTerminator(what) => write!(f, "did not find {}", what),
            ParseError::NoStatements => write!(f, "no statements found"),
        }
    }
}

impl std::error::Error for ParseError {}
