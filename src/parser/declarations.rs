//! Declaration parsing implementation
//!
//! This module handles the top level of the grammar:
//!
//! - Preprocessor directives, carried through as leaf nodes
//! - Function definitions and prototypes: `type name ( )` followed by a
//!   body or `;`
//! - Variable declarations: `const? type name (= expr)? (, name (= expr)?)* ;`
//!
//! # Grammar
//!
//! ```text
//! program      ::= top_level_declaration*
//! top_level    ::= preprocessor | function_or_prototype | var_decl
//! function_or_prototype ::= type IDENT "(" ")" ( block | ";" )
//! var_decl     ::= "const"? type declarator ("," declarator)* ";"
//! declarator   ::= IDENT ("=" expression)?
//! ```
//!
//! A declaration and a function start identically (`type IDENT`), so the
//! token two positions ahead of the type keyword decides: `(` means a
//! function, anything else a variable. Parameter lists are not parsed.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use super::ast::{Node, NodeKind};
use super::lexer::TokenClass;
use super::parse::{ParseError, Parser};

/// Keywords that may open a top-level declaration.
const TYPE_KEYWORDS: &[&str] = &["int", "float", "char", "void", "const"];

impl Parser {
    /// Parse one top-level declaration.
    pub(crate) fn parse_top_level_declaration(&mut self) -> Result<Node, ParseError> {
        let head = match self.peek() {
            Some(token) => (token.class, token.lexeme.clone()),
            None => return Err(ParseError::UnrecognizedTopLevel { found: None }),
        };

        if head.0 == TokenClass::PreprocessorDirective {
            let directive = self.match_token(TokenClass::PreprocessorDirective, None)?;
            return Ok(Node::leaf(
                NodeKind::PreprocessorDirective,
                directive.lexeme,
                directive.line,
            ));
        }

        if head.0 == TokenClass::Keyword && TYPE_KEYWORDS.contains(&head.1.as_str()) {
            // The type is token 0 and the name token 1, so the token two
            // positions ahead resolves the declaration/function ambiguity.
            if self.lookahead(2).is_some_and(|t| t.lexeme == "(") {
                return self.parse_function_or_prototype();
            }
            return self.parse_variable_declaration();
        }

        Err(ParseError::UnrecognizedTopLevel {
            found: self.found(),
        })
    }

    /// Parse `type IDENT ( )` followed by either a body (definition) or a
    /// `;` (prototype). The node's text is the function name.
    fn parse_function_or_prototype(&mut self) -> Result<Node, ParseError> {
        let start_line = self.peek_line();
        let type_token = self.match_token(TokenClass::Keyword, None)?;
        let name_token = self.match_token(TokenClass::Identifier, None)?;

        self.match_token(TokenClass::SpecialCharacter, Some("("))?;
        // Parameter lists are not part of the grammar.
        self.match_token(TokenClass::SpecialCharacter, Some(")"))?;

        if self.peek_value_is("{") {
            let mut node = Node::new(NodeKind::FunctionDefinition, name_token.lexeme, start_line);
            node.push(Node::leaf(
                NodeKind::TypeSpecifier,
                type_token.lexeme,
                type_token.line,
            ));
            node.push(self.parse_block_statement()?);
            Ok(node)
        } else if self.peek_value_is(";") {
            self.match_token(TokenClass::SpecialCharacter, Some(";"))?;
            let mut node = Node::new(NodeKind::FunctionPrototype, name_token.lexeme, start_line);
            node.push(Node::leaf(
                NodeKind::TypeSpecifier,
                type_token.lexeme,
                type_token.line,
            ));
            Ok(node)
        } else {
            Err(ParseError::UnexpectedToken {
                expected_class: TokenClass::SpecialCharacter,
                expected_value: Some("{".to_string()),
                found: self.found(),
            })
        }
    }

    /// Parse a variable declaration statement with one or more declarators.
    ///
    /// Children in order: optional `Keyword (const)`, `TypeSpecifier`, then a
    /// `Declarator` per name, each optionally holding an `Initializer` whose
    /// single child is the initializing expression.
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<Node, ParseError> {
        let start_line = self.peek_line();
        let mut decl = Node::new(NodeKind::VariableDeclarationStatement, "", start_line);

        if self.peek_value_is("const") {
            let token = self.match_token(TokenClass::Keyword, Some("const"))?;
            decl.push(Node::leaf(NodeKind::Keyword, token.lexeme, token.line));
        }

        let type_token = self.match_token(TokenClass::Keyword, None)?;
        decl.push(Node::leaf(
            NodeKind::TypeSpecifier,
            type_token.lexeme,
            type_token.line,
        ));

        loop {
            if self.peek_value_is(",") {
                self.match_token(TokenClass::SpecialCharacter, Some(","))?;
            }

            let name_token = self.match_token(TokenClass::Identifier, None)?;
            let mut declarator = Node::new(NodeKind::Declarator, name_token.lexeme, name_token.line);

            if self.peek_value_is("=") {
                self.match_token(TokenClass::Operator, Some("="))?;
                let mut initializer = Node::new(NodeKind::Initializer, "=", self.peek_line());
                initializer.push(self.parse_expression()?);
                declarator.push(initializer);
            }

            decl.push(declarator);

            if !self.peek_value_is(",") {
                break;
            }
        }

        self.match_token(TokenClass::SpecialCharacter, Some(";"))?;
        Ok(decl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn parse(source: &str) -> Result<Node, ParseError> {
        let tokens = Lexer::new(source).tokenize().into_tokens().unwrap();
        Parser::new(tokens).parse_program()
    }

    #[test]
    fn test_prototype_vs_declaration() {
        let program = parse("int foo ( ) ;").unwrap();
        assert_eq!(program.children[0].kind, NodeKind::FunctionPrototype);
        assert_eq!(program.children[0].text, "foo");

        let program = parse("int foo ;").unwrap();
        let decl = &program.children[0];
        assert_eq!(decl.kind, NodeKind::VariableDeclarationStatement);
        assert_eq!(decl.children[1].kind, NodeKind::Declarator);
        assert_eq!(decl.children[1].text, "foo");
    }

    #[test]
    fn test_function_definition_with_body() {
        let program = parse("int foo ( ) { return 0 ; }").unwrap();
        let func = &program.children[0];

        assert_eq!(func.kind, NodeKind::FunctionDefinition);
        assert_eq!(func.text, "foo");
        assert_eq!(func.children[0].kind, NodeKind::TypeSpecifier);
        assert_eq!(func.children[0].text, "int");
        let block = &func.children[1];
        assert_eq!(block.kind, NodeKind::BlockStatement);
        assert_eq!(block.children[0].kind, NodeKind::ReturnStatement);
    }

    #[test]
    fn test_multi_declarator_with_initializers() {
        let program = parse("const int x = 1, y, z = 2 + 3;").unwrap();
        let decl = &program.children[0];

        assert_eq!(decl.children[0].kind, NodeKind::Keyword);
        assert_eq!(decl.children[0].text, "const");
        assert_eq!(decl.children[1].kind, NodeKind::TypeSpecifier);

        let x = &decl.children[2];
        assert_eq!(x.text, "x");
        assert_eq!(x.children[0].kind, NodeKind::Initializer);
        assert_eq!(x.children[0].children[0].kind, NodeKind::Constant);

        let y = &decl.children[3];
        assert_eq!(y.text, "y");
        assert!(y.children.is_empty());

        let z = &decl.children[4];
        assert_eq!(z.children[0].children[0].kind, NodeKind::BinaryExpression);
    }

    #[test]
    fn test_preprocessor_directive_node() {
        let program = parse("#include <stdio.h>\nint x;").unwrap();
        let directive = &program.children[0];

        assert_eq!(directive.kind, NodeKind::PreprocessorDirective);
        assert_eq!(directive.text, "#include <stdio.h>");
        assert_eq!(directive.line, 1);
    }

    #[test]
    fn test_unrecognized_top_level() {
        let err = parse("foo;").unwrap_err();
        assert!(matches!(err, ParseError::UnrecognizedTopLevel { .. }));
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_missing_body_or_semicolon_after_signature() {
        let err = parse("int foo ( ) int").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }
}
