//! C-subset front end
//!
//! This module transforms C-subset source text into an Abstract Syntax Tree
//! (AST) in two decoupled stages:
//! - [`lexer`]: Tokenization (source text → classified tokens)
//! - [`interchange`]: The textual `<CLASS, VALUE, LINE>` boundary between
//!   the stages
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Supported C Subset
//!
//! The parser supports a pedagogical subset of C:
//! - Top level: preprocessor directives, global variable declarations,
//!   function definitions and prototypes (without parameter lists)
//! - Statements: declarations, blocks, `if`/`else`, `for`, `return`, empty
//!   and expression statements
//! - Expressions: assignment, equality, relational, additive, and
//!   multiplicative operators plus parenthesized subexpressions
//!
//! The scanner recognizes considerably more than the grammar consumes (the
//! full C keyword set, compound assignment operators, char literals); the
//! parser rejects those constructs with a syntax error rather than the
//! scanner with a lexical one.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary
//! operators and a bounded two-token lookahead to tell variable declarations
//! from functions. No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod interchange;
pub mod lexer;
pub mod parse;
mod statements;
