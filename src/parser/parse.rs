//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure, including the error type, cursor helpers, and the main
//! parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following
//! organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: Top-level declarations, functions, and prototypes
//! - `statements`: Statements (if, for, return, blocks)
//! - `expressions`: Expressions with precedence climbing
//!
//! Parser methods are split across multiple files using `impl Parser`
//! blocks, allowing each module to extend the Parser with related
//! functionality while maintaining access to the shared cursor state.
//!
//! # Failure semantics
//!
//! The first mismatch anywhere in the grammar aborts the whole parse by
//! propagating a [`ParseError`] up through every rule; there is no error
//! recovery and no partial tree is ever returned.

use super::ast::{Node, NodeKind};
use super::lexer::{Token, TokenClass};
use std::fmt;

/// Snapshot of the token a failing rule was looking at; `None` means the
/// failure happened past the last meaningful token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundToken {
    pub class: TokenClass,
    pub value: String,
    pub line: usize,
}

impl From<&Token> for FoundToken {
    fn from(token: &Token) -> Self {
        Self {
            class: token.class,
            value: token.lexeme.clone(),
            line: token.line,
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `match` failed: the current token is not the expected class/value.
    UnexpectedToken {
        expected_class: TokenClass,
        expected_value: Option<String>,
        found: Option<FoundToken>,
    },
    /// A primary expression was required but nothing usable was there.
    ExpectedExpression { found: Option<FoundToken> },
    /// A top-level token that starts neither a recognized declaration nor a
    /// preprocessor directive.
    UnrecognizedTopLevel { found: Option<FoundToken> },
}

impl ParseError {
    /// Line at which the failure was detected; `None` means end of file.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedToken { found, .. }
            | ParseError::ExpectedExpression { found }
            | ParseError::UnrecognizedTopLevel { found } => found.as_ref().map(|f| f.line),
        }
    }
}

fn write_location(f: &mut fmt::Formatter<'_>, found: &Option<FoundToken>) -> fmt::Result {
    match found {
        Some(token) => write!(f, "[Line {}] Syntax Error: ", token.line),
        None => write!(f, "[End of File] Syntax Error: "),
    }
}

fn write_found(f: &mut fmt::Formatter<'_>, found: &Option<FoundToken>) -> fmt::Result {
    match found {
        Some(token) => write!(f, "got {} with value '{}'", token.class, token.value),
        None => write!(f, "the input ended"),
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                expected_class,
                expected_value,
                found,
            } => {
                write_location(f, found)?;
                write!(f, "Expected {}", expected_class)?;
                if let Some(value) = expected_value {
                    write!(f, " with value '{}'", value)?;
                }
                write!(f, ", but ")?;
                write_found(f, found)
            }
            ParseError::ExpectedExpression { found } => {
                write_location(f, found)?;
                write!(f, "Expected a value, variable, or expression in parentheses, but ")?;
                write_found(f, found)
            }
            ParseError::UnrecognizedTopLevel { found } => {
                write_location(f, found)?;
                write!(
                    f,
                    "Unrecognized top-level statement. Expected a global variable or function, but "
                )?;
                write_found(f, found)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser for the C subset
///
/// Consumes a token sequence (scanned directly or decoded from an
/// interchange file) and builds the AST. The cursor presents a
/// comment-filtering view of the sequence: `Single-Line Comment` and
/// `Multi-Line Comment` tokens are invisible to every grammar rule.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse the entire program (top-level declarations until end of input).
    pub fn parse_program(&mut self) -> Result<Node, ParseError> {
        let line = self.peek().map(|t| t.line).unwrap_or(0);
        let mut program = Node::new(NodeKind::Program, "", line);

        while !self.is_at_end() {
            let declaration = self.parse_top_level_declaration()?;
            program.push(declaration);
        }

        Ok(program)
    }

    // ===== Cursor helpers =====

    /// Index of the first meaningful (non-comment) token at or after the
    /// cursor.
    fn peek_index(&self) -> Option<usize> {
        self.tokens[self.position..]
            .iter()
            .position(|t| !t.class.is_comment())
            .map(|offset| self.position + offset)
    }

    /// Current meaningful token, without consuming.
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.peek_index().map(|i| &self.tokens[i])
    }

    /// The n-th meaningful token ahead of the cursor (`lookahead(0)` is the
    /// same token `peek` returns).
    pub(crate) fn lookahead(&self, n: usize) -> Option<&Token> {
        self.tokens[self.position..]
            .iter()
            .filter(|t| !t.class.is_comment())
            .nth(n)
    }

    /// Move the cursor past the current meaningful token.
    pub(crate) fn advance(&mut self) {
        match self.peek_index() {
            Some(i) => self.position = i + 1,
            None => self.position = self.tokens.len(),
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek_index().is_none()
    }

    /// True when the current meaningful token has exactly this lexeme.
    pub(crate) fn peek_value_is(&self, value: &str) -> bool {
        self.peek().is_some_and(|t| t.lexeme == value)
    }

    /// Line of the current meaningful token, 0 past the end.
    pub(crate) fn peek_line(&self) -> usize {
        self.peek().map(|t| t.line).unwrap_or(0)
    }

    pub(crate) fn found(&self) -> Option<FoundToken> {
        self.peek().map(FoundToken::from)
    }

    /// Consume the current token if its class (and, when given, exact value)
    /// matches; otherwise fail the parse.
    pub(crate) fn match_token(
        &mut self,
        class: TokenClass,
        value: Option<&str>,
    ) -> Result<Token, ParseError> {
        match self.peek() {
            Some(token) if token.class == class && value.map_or(true, |v| token.lexeme == v) => {
                let token = token.clone();
                self.advance();
                Ok(token)
            }
            _ => Err(ParseError::UnexpectedToken {
                expected_class: class,
                expected_value: value.map(str::to_string),
                found: self.found(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn tokens(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize().into_tokens().unwrap()
    }

    #[test]
    fn test_peek_skips_comments() {
        let mut parser = Parser::new(tokens("/* lead */ // more\nint"));

        assert_eq!(parser.peek().unwrap().lexeme, "int");
        parser.advance();
        assert!(parser.is_at_end());
    }

    #[test]
    fn test_lookahead_skips_comments() {
        let parser = Parser::new(tokens("int /* a */ foo // b\n ( )"));

        assert_eq!(parser.lookahead(0).unwrap().lexeme, "int");
        assert_eq!(parser.lookahead(1).unwrap().lexeme, "foo");
        assert_eq!(parser.lookahead(2).unwrap().lexeme, "(");
        assert!(parser.lookahead(4).is_none());
    }

    #[test]
    fn test_match_token_reports_expected_vs_found() {
        let mut parser = Parser::new(tokens("int"));
        let err = parser
            .match_token(TokenClass::Identifier, None)
            .unwrap_err();

        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected_class: TokenClass::Identifier,
                expected_value: None,
                found: Some(FoundToken {
                    class: TokenClass::Keyword,
                    value: "int".to_string(),
                    line: 1,
                }),
            }
        );
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_match_token_at_end_of_file() {
        let mut parser = Parser::new(Vec::new());
        let err = parser
            .match_token(TokenClass::SpecialCharacter, Some(";"))
            .unwrap_err();

        assert_eq!(err.line(), None);
        assert!(err.to_string().starts_with("[End of File]"));
    }

    #[test]
    fn test_error_messages_name_line_and_values() {
        let mut parser = Parser::new(tokens("int x"));
        parser.advance();
        let err = parser
            .match_token(TokenClass::SpecialCharacter, Some(";"))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "[Line 1] Syntax Error: Expected SPECIAL CHARACTER with value ';', \
             but got IDENTIFIER with value 'x'"
        );
    }
}
