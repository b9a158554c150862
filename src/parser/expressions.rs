//! Expression parsing with precedence climbing
//!
//! Precedence is encoded in the call nesting, lowest first:
//!
//! ```text
//! assignment     ::= equality ("=" assignment)?          (right-associative)
//! equality       ::= relational (("==" | "!=") relational)*
//! relational     ::= additive (("<" | ">" | "<=" | ">=") additive)*
//! additive       ::= multiplicative (("+" | "-") multiplicative)*
//! multiplicative ::= primary (("*" | "/") primary)*
//! primary        ::= NUMERIC | IDENTIFIER | "(" expression ")"
//! ```
//!
//! Each binary level folds left-associatively: the running left node becomes
//! the first child of a fresh `BinaryExpression` for every operator found.
//! Only plain `=` exists at the assignment level; compound assignment
//! operators are lexed but have no grammar rule.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use super::ast::{Node, NodeKind};
use super::lexer::TokenClass;
use super::parse::{ParseError, Parser};

impl Parser {
    /// Parse an expression (top-level entry point).
    pub(crate) fn parse_expression(&mut self) -> Result<Node, ParseError> {
        self.parse_assignment()
    }

    /// Parse assignment (right-associative, single `=` level).
    fn parse_assignment(&mut self) -> Result<Node, ParseError> {
        let start_line = self.peek_line();
        let left = self.parse_equality()?;

        if self.peek_value_is("=") {
            let op = self.match_token(TokenClass::Operator, Some("="))?;
            let right = self.parse_assignment()?;
            let mut node = Node::new(NodeKind::AssignmentExpression, op.lexeme, start_line);
            node.push(left);
            node.push(right);
            return Ok(node);
        }

        Ok(left)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_relational()?;

        while self.peek_value_is("==") || self.peek_value_is("!=") {
            let op = self.match_token(TokenClass::Operator, None)?;
            let right = self.parse_relational()?;
            left = Self::fold_binary(op.lexeme, op.line, left, right);
        }

        Ok(left)
    }

    /// Parse relational (< > <= >=)
    fn parse_relational(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_additive()?;

        while self.peek_value_is("<")
            || self.peek_value_is(">")
            || self.peek_value_is("<=")
            || self.peek_value_is(">=")
        {
            let op = self.match_token(TokenClass::Operator, None)?;
            let right = self.parse_additive()?;
            left = Self::fold_binary(op.lexeme, op.line, left, right);
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_multiplicative()?;

        while self.peek_value_is("+") || self.peek_value_is("-") {
            let op = self.match_token(TokenClass::Operator, None)?;
            let right = self.parse_multiplicative()?;
            left = Self::fold_binary(op.lexeme, op.line, left, right);
        }

        Ok(left)
    }

    /// Parse multiplicative (* /)
    fn parse_multiplicative(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_primary()?;

        while self.peek_value_is("*") || self.peek_value_is("/") {
            let op = self.match_token(TokenClass::Operator, None)?;
            let right = self.parse_primary()?;
            left = Self::fold_binary(op.lexeme, op.line, left, right);
        }

        Ok(left)
    }

    /// Parse primary (constants, identifiers, parenthesized expressions).
    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let head = match self.peek() {
            Some(token) => (token.class, token.lexeme.clone(), token.line),
            None => return Err(ParseError::ExpectedExpression { found: None }),
        };

        match head.0 {
            TokenClass::NumericConstant => {
                self.advance();
                Ok(Node::leaf(NodeKind::Constant, head.1, head.2))
            }
            TokenClass::Identifier => {
                self.advance();
                Ok(Node::leaf(NodeKind::Identifier, head.1, head.2))
            }
            _ if head.1 == "(" => {
                self.advance();
                let expr = self.parse_expression()?;
                self.match_token(TokenClass::SpecialCharacter, Some(")"))?;
                Ok(expr)
            }
            _ => Err(ParseError::ExpectedExpression {
                found: self.found(),
            }),
        }
    }

    /// Wrap two operands in a `BinaryExpression` carrying the operator lexeme.
    fn fold_binary(op: String, line: usize, left: Node, right: Node) -> Node {
        let mut node = Node::new(NodeKind::BinaryExpression, op, line);
        node.push(left);
        node.push(right);
        node
    }
}
