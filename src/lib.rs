//! # Introduction
//!
//! cminus is a two-stage front end for a pedagogical C subset: a scanner
//! that turns raw source text into a stream of classified tokens, and a
//! recursive-descent parser that consumes that stream and builds an abstract
//! syntax tree. The stages are decoupled by a textual interchange format
//! (`tokens.txt`), so either can be driven on its own.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → tokens.txt → Parser → AST
//! ```
//!
//! 1. [`parser::lexer`] — tokenises the source in one linear pass. Comments
//!    are kept in the stream as tokens of their own classes.
//! 2. [`parser::interchange`] — encodes/decodes the `<CLASS, VALUE, LINE>`
//!    token file.
//! 3. [`parser::parse`] — recursive descent over a comment-filtering view of
//!    the tokens, producing [`parser::ast::Node`] trees.
//! 4. [`driver`] — file I/O glue tying the stages together for the CLI.
//!
//! Both stages run to completion or to their first fatal error; there is no
//! error recovery, and a failed parse never yields a partial tree.

pub mod driver;
pub mod parser;
