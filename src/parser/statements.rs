//! Statement parsing implementation
//!
//! This module handles the statement level of the grammar:
//!
//! - Control flow: `if`/`else`, `for`
//! - `return` with an optional expression
//! - Blocks: `{ ... }`
//! - Empty statements: a bare `;`
//! - Local variable declarations
//! - Expression statements
//!
//! # Grammar
//!
//! ```text
//! statement ::= if_stmt | for_stmt | return_stmt | block | ";"
//!             | var_decl | expr_stmt
//! block     ::= "{" statement* "}"
//! if_stmt   ::= "if" "(" expression ")" statement ("else" statement)?
//! for_stmt  ::= "for" "(" (";" | var_decl | expr_stmt)
//!                         (";" | expression ";") expression? ")" statement
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use super::ast::{Node, NodeKind};
use super::lexer::TokenClass;
use super::parse::{ParseError, Parser};

/// Keywords that open a declaration in statement position.
const DECLARATION_KEYWORDS: &[&str] = &["const", "int", "float", "char"];

/// Keywords that open a declaration in a `for` initializer clause.
const FOR_INIT_KEYWORDS: &[&str] = &["int", "char", "float"];

impl Parser {
    /// Parse one statement, dispatching on the current lexeme.
    pub(crate) fn parse_statement(&mut self) -> Result<Node, ParseError> {
        let head = self.peek().map(|t| t.lexeme.clone());

        match head.as_deref() {
            Some("if") => self.parse_if_statement(),
            Some("for") => self.parse_for_statement(),
            Some("return") => self.parse_return_statement(),
            Some("{") => self.parse_block_statement(),
            Some(";") => {
                let token = self.match_token(TokenClass::SpecialCharacter, Some(";"))?;
                Ok(Node::leaf(NodeKind::EmptyStatement, ";", token.line))
            }
            Some(word) if DECLARATION_KEYWORDS.contains(&word) => {
                self.parse_variable_declaration()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// Parse `{ statement* }`.
    pub(crate) fn parse_block_statement(&mut self) -> Result<Node, ParseError> {
        let open = self.match_token(TokenClass::SpecialCharacter, Some("{"))?;
        let mut block = Node::new(NodeKind::BlockStatement, "{}", open.line);

        while self.peek().is_some_and(|t| t.lexeme != "}") {
            block.push(self.parse_statement()?);
        }

        self.match_token(TokenClass::SpecialCharacter, Some("}"))?;
        Ok(block)
    }

    /// Parse `if ( expression ) statement (else statement)?`.
    ///
    /// The optional else branch is appended as a third child.
    fn parse_if_statement(&mut self) -> Result<Node, ParseError> {
        let keyword = self.match_token(TokenClass::Keyword, Some("if"))?;
        let mut node = Node::new(NodeKind::IfStatement, "if", keyword.line);

        self.match_token(TokenClass::SpecialCharacter, Some("("))?;
        node.push(self.parse_expression()?);
        self.match_token(TokenClass::SpecialCharacter, Some(")"))?;
        node.push(self.parse_statement()?);

        if self.peek_value_is("else") {
            self.match_token(TokenClass::Keyword, Some("else"))?;
            node.push(self.parse_statement()?);
        }

        Ok(node)
    }

    /// Parse `for ( init cond incr ) statement`.
    ///
    /// Each clause may be empty; an empty clause is materialized as a
    /// placeholder node so the `ForStatement` always has exactly three
    /// children before the body.
    fn parse_for_statement(&mut self) -> Result<Node, ParseError> {
        let keyword = self.match_token(TokenClass::Keyword, Some("for"))?;
        let start_line = keyword.line;
        let mut node = Node::new(NodeKind::ForStatement, "for", start_line);

        self.match_token(TokenClass::SpecialCharacter, Some("("))?;

        // Initializer: empty, a declaration, or an expression statement.
        if self.peek_value_is(";") {
            self.match_token(TokenClass::SpecialCharacter, Some(";"))?;
            node.push(Node::leaf(NodeKind::EmptyStatement, "initializer", start_line));
        } else if self
            .peek()
            .is_some_and(|t| FOR_INIT_KEYWORDS.contains(&t.lexeme.as_str()))
        {
            node.push(self.parse_variable_declaration()?);
        } else {
            node.push(self.parse_expression_statement()?);
        }

        // Condition.
        if self.peek_value_is(";") {
            self.match_token(TokenClass::SpecialCharacter, Some(";"))?;
            node.push(Node::leaf(NodeKind::EmptyStatement, "condition", start_line));
        } else {
            node.push(self.parse_expression()?);
            self.match_token(TokenClass::SpecialCharacter, Some(";"))?;
        }

        // Increment.
        if self.peek_value_is(")") {
            node.push(Node::leaf(NodeKind::EmptyStatement, "increment", start_line));
        } else {
            node.push(self.parse_expression()?);
        }

        self.match_token(TokenClass::SpecialCharacter, Some(")"))?;
        node.push(self.parse_statement()?);
        Ok(node)
    }

    /// Parse `return expression? ;`.
    fn parse_return_statement(&mut self) -> Result<Node, ParseError> {
        let keyword = self.match_token(TokenClass::Keyword, Some("return"))?;
        let mut node = Node::new(NodeKind::ReturnStatement, "return", keyword.line);

        if !self.peek_value_is(";") {
            node.push(self.parse_expression()?);
        }

        self.match_token(TokenClass::SpecialCharacter, Some(";"))?;
        Ok(node)
    }

    /// Parse `expression ;`.
    pub(crate) fn parse_expression_statement(&mut self) -> Result<Node, ParseError> {
        let mut node = Node::new(NodeKind::ExpressionStatement, "", self.peek_line());
        node.push(self.parse_expression()?);
        self.match_token(TokenClass::SpecialCharacter, Some(";"))?;
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn parse_body(statements: &str) -> Node {
        let source = format!("void f() {{ {} }}", statements);
        let tokens = Lexer::new(&source).tokenize().into_tokens().unwrap();
        let program = Parser::new(tokens).parse_program().unwrap();
        // FunctionDefinition -> [TypeSpecifier, BlockStatement]
        program.children[0].children[1].clone()
    }

    #[test]
    fn test_if_else_children() {
        let block = parse_body("if (x == 1) y = 2; else y = 3;");
        let if_node = &block.children[0];

        assert_eq!(if_node.kind, NodeKind::IfStatement);
        assert_eq!(if_node.children.len(), 3);
        assert_eq!(if_node.children[0].kind, NodeKind::BinaryExpression);
        assert_eq!(if_node.children[1].kind, NodeKind::ExpressionStatement);
        assert_eq!(if_node.children[2].kind, NodeKind::ExpressionStatement);
    }

    #[test]
    fn test_if_without_else_has_two_children() {
        let block = parse_body("if (x) y = 2;");
        assert_eq!(block.children[0].children.len(), 2);
    }

    #[test]
    fn test_for_with_all_clauses() {
        let block = parse_body("for (int i = 0; i < 10; i = i + 1) x = i;");
        let for_node = &block.children[0];

        assert_eq!(for_node.kind, NodeKind::ForStatement);
        assert_eq!(for_node.children.len(), 4);
        assert_eq!(
            for_node.children[0].kind,
            NodeKind::VariableDeclarationStatement
        );
        assert_eq!(for_node.children[1].kind, NodeKind::BinaryExpression);
        assert_eq!(for_node.children[2].kind, NodeKind::AssignmentExpression);
        assert_eq!(for_node.children[3].kind, NodeKind::ExpressionStatement);
    }

    #[test]
    fn test_for_with_empty_clauses_gets_placeholders() {
        let block = parse_body("for (;;) ;");
        let for_node = &block.children[0];

        assert_eq!(for_node.children.len(), 4);
        let texts: Vec<&str> = for_node.children[..3]
            .iter()
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(texts, vec!["initializer", "condition", "increment"]);
        assert!(for_node.children[..3]
            .iter()
            .all(|c| c.kind == NodeKind::EmptyStatement));
        assert_eq!(for_node.children[3].kind, NodeKind::EmptyStatement);
    }

    #[test]
    fn test_empty_statement() {
        let block = parse_body(";");
        assert_eq!(block.children[0].kind, NodeKind::EmptyStatement);
        assert_eq!(block.children[0].text, ";");
    }

    #[test]
    fn test_return_with_and_without_value() {
        let block = parse_body("return x + 1; return;");

        assert_eq!(block.children[0].children.len(), 1);
        assert!(block.children[1].children.is_empty());
    }

    #[test]
    fn test_nested_blocks() {
        let block = parse_body("{ int x; { x = 1; } }");
        let inner = &block.children[0];

        assert_eq!(inner.kind, NodeKind::BlockStatement);
        assert_eq!(inner.children[1].kind, NodeKind::BlockStatement);
    }

    #[test]
    fn test_unclosed_block_fails_at_end_of_file() {
        let tokens = Lexer::new("void f() { int x;")
            .tokenize()
            .into_tokens()
            .unwrap();
        let err = Parser::new(tokens).parse_program().unwrap_err();

        assert_eq!(err.line(), None);
        assert!(err.to_string().starts_with("[End of File]"));
    }
}
