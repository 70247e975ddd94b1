//! The recursive-descent parser and its grammar productions.
//!
//! Every production follows the same contract: push a speculative cursor
//! frame, attempt the match, and resolve the frame exactly once (commit on
//! success, rollback on failure), so a failed production never leaves the
//! shared cursor advanced and never leaks partially built tokens into an
//! ancestor's forest. The `attempt` combinator enforces that pairing on
//! every exit path; `first_of` implements ordered choice over productions.

use std::ops::Range;

use regex::Regex;

use crate::fortran::cursor::CursorStack;
use crate::fortran::error::ParseError;
use crate::fortran::matchers;
use crate::fortran::source::SourceBuffer;
use crate::fortran::tokens::{PrimitiveKind, Token, TokenForest};

/// A grammar production: speculatively consumes input and returns a forest,
/// or fails with the committed cursor untouched.
pub type Production = fn(&mut Parser) -> Result<TokenForest, ParseError>;

/// Parser state for one invocation: the immutable source and the cursor
/// stack tracking nested speculative attempts.
pub struct Parser {
    source: SourceBuffer,
    cursors: CursorStack,
}

impl Parser {
    pub fn new(text: &str) -> Self {
        Parser {
            source: SourceBuffer::new(text),
            cursors: CursorStack::new(),
        }
    }

    /// Current committed cursor offset.
    pub fn cursor(&self) -> usize {
        self.cursors.offset()
    }

    pub fn source(&self) -> &SourceBuffer {
        &self.source
    }

    /// Number of open cursor frames; 1 whenever no production is running.
    pub fn depth(&self) -> usize {
        self.cursors.depth()
    }

    /// Parse the whole input.
    ///
    /// Accepts as many consecutive statements as exist and succeeds on any
    /// non-empty forest; trailing unrecognized input is left unconsumed.
    /// Fails only when nothing at all was recognized.
    pub fn parse(&mut self) -> Result<TokenForest, ParseError> {
        let forest = self.accept_statements();
        if forest.is_empty() {
            Err(ParseError::NoStatements)
        } else {
            Ok(forest)
        }
    }

    /// Run a production body inside a speculative cursor frame.
    ///
    /// Commits the frame when the body succeeds, rolls it back when it
    /// fails, including on early returns, so the stack discipline holds on
    /// every exit path.
    fn attempt<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.cursors.push();
        let outcome = body(self);
        match &outcome {
            Ok(_) => self.cursors.commit(),
            Err(_) => self.cursors.rollback(),
        }
        outcome
    }

    /// Ordered choice: try alternatives in priority order, first success
    /// wins, losers' speculative state is discarded by their own attempts.
    fn first_of(
        &mut self,
        alternatives: &[Production],
        what: &'static str,
    ) -> Result<TokenForest, ParseError> {
        for alternative in alternatives {
            if let Ok(forest) = alternative(self) {
                return Ok(forest);
            }
        }
        Err(ParseError::Expected(what))
    }

    /// Case-insensitive literal at the cursor; advances on success.
    fn matches(&mut self, text: &str) -> bool {
        matchers::literal(&self.source, &mut self.cursors, text)
    }

    /// Anchored pattern at the cursor; advances past the match.
    fn pattern(&mut self, re: &Regex) -> Option<Range<usize>> {
        matchers::pattern(&self.source, &mut self.cursors, re)
    }

    fn matched_text(&self, span: &Range<usize>) -> String {
        self.source.slice(span).to_string()
    }

    /// Fixed-form continuation: a newline run, optional whitespace, the
    /// continuation marker `1`, optional whitespace.
    pub fn accept_continuation(&mut self) -> Result<TokenForest, ParseError> {
        self.attempt(|p| {
            let mut forest = TokenForest::new();
            if !forest.absorb(p.accept_newline()) {
                return Err(ParseError::Expected("newline"));
            }
            forest.absorb(p.accept_whitespace());
            if !p.matches("1") {
                return Err(ParseError::Expected("continuation literal '1'"));
            }
            forest.push(Token::Continuation);
            forest.absorb(p.accept_whitespace());
            Ok(forest)
        })
    }

    /// Horizontal whitespace run, greedily absorbing a following
    /// continuation; a bare continuation also counts as whitespace.
    pub fn accept_whitespace(&mut self) -> Result<TokenForest, ParseError> {
        self.attempt(|p| {
            let mut forest = TokenForest::new();
            match p.pattern(&matchers::WHITESPACE_RUN) {
                Some(span) => {
                    forest.push(Token::Whitespace {
                        text: p.matched_text(&span),
                    });
                    forest.absorb(p.accept_continuation());
                    Ok(forest)
                }
                None => {
                    let continuation = p
                        .accept_continuation()
                        .map_err(|_| ParseError::Expected("whitespace"))?;
                    forest.join(continuation);
                    Ok(forest)
                }
            }
        })
    }

    /// One or more newline characters.
    pub fn accept_newline(&mut self) -> Result<TokenForest, ParseError> {
        self.attempt(|p| {
            let span = p
                .pattern(&matchers::NEWLINE_RUN)
                .ok_or(ParseError::Expected("newline(s)"))?;
            let text = p.matched_text(&span);
            Ok(vec![Token::NewLine { text }].into())
        })
    }

    /// Optional leading whitespace, then a `!` comment to end of line.
    pub fn accept_comment(&mut self) -> Result<TokenForest, ParseError> {
        self.attempt(|p| {
            let mut forest = TokenForest::new();
            forest.absorb(p.accept_whitespace());
            let span = p
                .pattern(&matchers::COMMENT_LINE)
                .ok_or(ParseError::Expected("comment"))?;
            forest.push(Token::Comment {
                text: p.matched_text(&span),
            });
            Ok(forest)
        })
    }

    /// A quoted literal: `'`, a possibly-empty run of non-apostrophe
    /// non-newline characters, `'`. Each step is independently fatal; a
    /// missing closing quote rolls back the opening quote too.
    pub fn accept_string(&mut self) -> Result<TokenForest, ParseError> {
        self.attempt(|p| {
            if !p.matches("'") {
                return Err(ParseError::Expected("left quote"));
            }
            let span = p
                .pattern(&matchers::UNQUOTED_RUN)
                .ok_or(ParseError::Expected("string value"))?;
            let value = p.matched_text(&span);
            if !p.matches("'") {
                return Err(ParseError::Expected("right quote"));
            }
            Ok(vec![Token::String { value }].into())
        })
    }

    /// Ordered choice over expression productions. Currently only string
    /// literals; new expression kinds slot in here without touching callers.
    pub fn accept_expression(&mut self) -> Result<TokenForest, ParseError> {
        self.first_of(&[Parser::accept_string], "expression")
    }

    /// A `print`/`type` intrinsic call: keyword, whitespace, `*`, a comma,
    /// then one or more comma-separated expressions.
    pub fn accept_primitive_call(&mut self) -> Result<TokenForest, ParseError> {
        self.attempt(|p| {
            let mut forest = TokenForest::new();
            forest.absorb(p.accept_whitespace());

            let kind = if p.matches("print") {
                PrimitiveKind::Print
            } else if p.matches("type") {
                PrimitiveKind::Type
            } else {
                return Err(ParseError::Expected("primitive call statement"));
            };

            p.accept_whitespace()
                .map_err(|_| ParseError::Expected("whitespace"))?;

            if !p.matches("*") {
                return Err(ParseError::Expected("'*'"));
            }
            let _ = p.accept_whitespace();
            if !p.matches(",") {
                return Err(ParseError::Expected("','"));
            }
            let _ = p.accept_whitespace();

            let mut arguments = TokenForest::new();
            while arguments.absorb(p.accept_expression()) {
                let _ = p.accept_whitespace();
                if !p.matches(",") {
                    break;
                }
                let _ = p.accept_whitespace();
            }
            if arguments.is_empty() {
                return Err(ParseError::Expected("1 or more expressions"));
            }

            forest.push(Token::PrimitiveCall { kind, arguments });
            Ok(forest)
        })
    }

    /// A program block: `program`, whitespace, a name, a run of statements,
    /// then `endprogram` or `end program`. A parsed body without the
    /// terminator is a structural failure and still rolls back whole.
    pub fn accept_program(&mut self) -> Result<TokenForest, ParseError> {
        self.attempt(|p| {
            if !p.matches("program") {
                return Err(ParseError::Expected("'program'"));
            }
            p.accept_whitespace()
                .map_err(|_| ParseError::Expected("whitespace"))?;
            let span = p
                .pattern(&matchers::IDENTIFIER)
                .ok_or(ParseError::Expected("program name"))?;
            let name = p.matched_text(&span);

            let statements = p.accept_statements();
            let mut forest = TokenForest::new();
            forest.push(Token::Program { name, statements });

            if p.matches("endprogram") || p.matches("end program") {
                Ok(forest)
            } else {
                Err(ParseError::MissingTerminator("end program statement"))
            }
        })
    }

    /// The statement loop: try each alternative in priority order and
    /// accumulate every success; stop cleanly the first time none match.
    ///
    /// This never fails. Every alternative consumes at least one code point
    /// on success, which guarantees the loop terminates.
    pub fn accept_statements(&mut self) -> TokenForest {
        const STATEMENTS: &[Production] = &[
            Parser::accept_whitespace,
            Parser::accept_newline,
            Parser::accept_comment,
            Parser::accept_primitive_call,
            Parser::accept_program,
        ];

        let mut forest = TokenForest::new();
        loop {
            let matched = STATEMENTS
                .iter()
                .any(|production| forest.absorb(production(self)));
            if !matched {
                return forest;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_commits_advancement() {
        let mut parser = Parser::new("  x");
        let forest = parser.accept_whitespace().unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(parser.cursor(), 2);
    }

    #[test]
    fn test_attempt_rolls_back_on_failure() {
        let mut parser = Parser::new("'unterminated");
        assert_eq!(
            parser.accept_string(),
            Err(ParseError::Expected("right quote"))
        );
        assert_eq!(parser.cursor(), 0);
    }

    #[test]
    fn test_stack_depth_is_neutral_across_calls() {
        let mut parser = Parser::new("program foo end program");
        let _ = parser.accept_program();
        let _ = parser.accept_whitespace();
        let _ = parser.accept_comment();
        assert_eq!(parser.cursors.depth(), 1);
    }

    #[test]
    fn test_first_of_reports_choice_name() {
        let mut parser = Parser::new("123");
        assert_eq!(
            parser.accept_expression(),
            Err(ParseError::Expected("expression"))
        );
        assert_eq!(parser.cursor(), 0);
    }
}
