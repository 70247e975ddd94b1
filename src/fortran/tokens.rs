//! Token data model and the ordered forest the grammar composes into.
//!
//! Tokens form a closed variant set so the renderer is exhaustively checked
//! at compile time. Each variant knows how to render itself as an indented,
//! parenthesized structural dump with one tab per nesting level.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fortran::error::ParseError;

/// Which intrinsic a primitive call statement invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Print,
    Type,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::Print => write!(f, "print"),
            PrimitiveKind::Type => write!(f, "type"),
        }
    }
}

/// A parsed node.
///
/// `Type` and `Function` are reserved for the function-definition grammar
/// and are not produced by any current production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    Program {
        name: String,
        statements: TokenForest,
    },
    Comment {
        text: String,
    },
    Whitespace {
        text: String,
    },
    NewLine {
        text: String,
    },
    Continuation,
    PrimitiveCall {
        kind: PrimitiveKind,
        arguments: TokenForest,
    },
    String {
        value: String,
    },
    Type {
        kind: String,
    },
    Function {
        name: String,
        return_type: Box<Token>,
        return_value: TokenForest,
        statements: TokenForest,
    },
}

fn tab(depth: usize) -> String {
    "\t".repeat(depth)
}

impl Token {
    /// Render this token at a nesting depth, one tab per level.
    ///
    /// Owned forests render their brackets at the owner's depth and their
    /// children one level deeper.
    pub fn render(&self, depth: usize) -> String {
        let tab = tab(depth);
        match self {
            Token::Program { name, statements } => format!(
                "{}PROGRAM(name: {}, statements: {})",
                tab,
                name,
                statements.render(depth)
            ),
            Token::Comment { text } => format!("{}COMMENT(value: '{}')", tab, text),
            Token::Whitespace { .. } => format!("{}WHITESPACE()", tab),
            Token::NewLine { .. } => format!("{}NEWLINE()", tab),
            Token::Continuation => format!("{}CONTINUATION()", tab),
            Token::PrimitiveCall { kind, arguments } => format!(
                "{}PRIMITIVECALL(kind: {}, values: {})",
                tab,
                kind,
                arguments.render(depth)
            ),
            Token::String { value } => format!("{}STRING(value: '{}')", tab, value),
            Token::Type { kind } => format!("{}TYPE(kind: {})", tab, kind),
            Token::Function {
                name,
                return_type,
                return_value,
                statements,
            } => format!(
                "{}FUNCTION(name: {}, returnType: {}, returnValue: {}, statements: {})",
                tab,
                name,
                return_type.render(0),
                return_value.render(depth),
                statements.render(depth)
            ),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(0))
    }
}

/// An ordered, appendable sequence of tokens.
///
/// Every grammar production returns a forest; append and concatenation are
/// the only mutators. An empty forest is a successful zero-length result,
/// distinct from a failed production.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenForest {
    values: Vec<Token>,
}

impl TokenForest {
    pub fn new() -> Self {
        TokenForest::default()
    }

    pub fn push(&mut self, token: Token) {
        self.values.push(token);
    }

    /// Append every token of another forest, returning how many were added.
    pub fn join(&mut self, other: TokenForest) -> usize {
        let added = other.values.len();
        self.values.extend(other.values);
        added
    }

    /// Join the result of a production if it succeeded.
    ///
    /// Returns true only when the production succeeded and contributed at
    /// least one token, which is what the statement loop keys on.
    pub fn absorb(&mut self, outcome: Result<TokenForest, ParseError>) -> bool {
        match outcome {
            Ok(forest) => self.join(forest) > 0,
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.values.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.values.iter()
    }

    /// Render the forest at a nesting depth.
    ///
    /// The bracket pair collapses to `[]` only when the forest is empty;
    /// otherwise children render one level deeper, separated by `,\n`, and
    /// the closing bracket sits at this depth.
    pub fn render(&self, depth: usize) -> String {
        if self.values.is_empty() {
            return "[]".to_string();
        }
        let mut result = String::from("[\n");
        for (index, child) in self.values.iter().enumerate() {
            result.push_str(&child.render(depth + 1));
            if index < self.values.len() - 1 {
                result.push_str(",\n");
            } else {
                result.push('\n');
            }
        }
        result.push_str(&tab(depth));
        result.push(']');
        result
    }
}

impl fmt::Display for TokenForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(0))
    }
}

impl From<Vec<Token>> for TokenForest {
    fn from(values: Vec<Token>) -> Self {
        TokenForest { values }
    }
}

impl<'a> IntoIterator for &'a TokenForest {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_empty_is_identity() {
        let mut forest: TokenForest = vec![Token::Continuation].into();
        let before = forest.clone();
        assert_eq!(forest.join(TokenForest::new()), 0);
        assert_eq!(forest, before);

        let mut empty = TokenForest::new();
        empty.join(before.clone());
        assert_eq!(empty, before);
    }

    #[test]
    fn test_join_lengths_add() {
        let mut left: TokenForest = vec![Token::Continuation, Token::Continuation].into();
        let right: TokenForest = vec![Token::String {
            value: "x".to_string(),
        }]
        .into();
        let added = left.join(right);
        assert_eq!(added, 1);
        assert_eq!(left.len(), 3);
    }

    #[test]
    fn test_absorb_discards_failures() {
        let mut forest = TokenForest::new();
        assert!(!forest.absorb(Err(ParseError::Expected("whitespace"))));
        assert!(forest.is_empty());
        assert!(!forest.absorb(Ok(TokenForest::new())));
        assert!(forest.absorb(Ok(vec![Token::Continuation].into())));
        assert_eq!(forest.len(), 1);
    }

    #[test]
    fn test_empty_forest_renders_collapsed_brackets() {
        assert_eq!(TokenForest::new().render(0), "[]");
        assert_eq!(TokenForest::new().render(3), "[]");
    }

    #[test]
    fn test_leaf_rendering() {
        let token = Token::String {
            value: "hi".to_string(),
        };
        assert_eq!(token.render(0), "STRING(value: 'hi')");
        assert_eq!(token.render(2), "\t\tSTRING(value: 'hi')");
        assert_eq!(Token::Continuation.render(1), "\tCONTINUATION()");
        let comment = Token::Comment {
            text: "! note".to_string(),
        };
        assert_eq!(comment.render(0), "COMMENT(value: '! note')");
    }

    #[test]
    fn test_program_rendering_with_comment() {
        let program = Token::Program {
            name: "foo".to_string(),
            statements: vec![Token::Comment {
                text: "! hello".to_string(),
            }]
            .into(),
        };
        assert_eq!(
            program.render(0),
            "PROGRAM(name: foo, statements: [\n\tCOMMENT(value: '! hello')\n])"
        );
    }

    #[test]
    fn test_nested_program_rendering() {
        let call = Token::PrimitiveCall {
            kind: PrimitiveKind::Print,
            arguments: vec![Token::String {
                value: "hi".to_string(),
            }]
            .into(),
        };
        let program = Token::Program {
            name: "foo".to_string(),
            statements: vec![call].into(),
        };
        assert_eq!(
            program.render(0),
            "PROGRAM(name: foo, statements: [\n\
             \tPRIMITIVECALL(kind: print, values: [\n\
             \t\tSTRING(value: 'hi')\n\
             \t])\n\
             ])"
        );
    }

    #[test]
    fn test_empty_program_rendering() {
        let program = Token::Program {
            name: "empty".to_string(),
            statements: TokenForest::new(),
        };
        assert_eq!(program.render(0), "PROGRAM(name: empty, statements: [])");
    }

    #[test]
    fn test_reserved_variant_rendering() {
        assert_eq!(
            Token::Type {
                kind: "integer".to_string()
            }
            .render(1),
            "\tTYPE(kind: integer)"
        );
        // Reserved variants follow the same container rule as Program and
        // PrimitiveCall: owned forests at the owner's depth, inline return
        // type, closing paren right after the bracket.
        let function = Token::Function {
            name: "f".to_string(),
            return_type: Box::new(Token::Type {
                kind: "integer".to_string(),
            }),
            return_value: TokenForest::new(),
            statements: vec![Token::Continuation].into(),
        };
        assert_eq!(
            function.render(0),
            "FUNCTION(name: f, returnType: TYPE(kind: integer), returnValue: [], \
             statements: [\n\tCONTINUATION()\n])"
        );
    }

    #[test]
    fn test_forest_separators() {
        let forest: TokenForest = vec![Token::Continuation, Token::Continuation].into();
        assert_eq!(
            forest.render(0),
            "[\n\tCONTINUATION(),\n\tCONTINUATION()\n]"
        );
    }
}
