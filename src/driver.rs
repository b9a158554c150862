//! Pipeline glue between the two stages and the filesystem
//!
//! The scanner and the parser never perform I/O themselves; this module owns
//! the boundary work: reading the source file, writing and re-reading the
//! token interchange file, and folding every stage's failure into one
//! [`PipelineError`] so an embedding CLI can format outcomes however it
//! chooses.

use crate::parser::ast::Node;
use crate::parser::interchange;
use crate::parser::lexer::{LexError, Lexer, ScanResult, Token};
use crate::parser::parse::{ParseError, Parser};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Everything that can stop the pipeline, lexical and syntactic failures
/// included, so a single `Result` describes a whole run.
#[derive(Debug)]
pub enum PipelineError {
    Lex(LexError),
    Syntax(ParseError),
    CannotOpenInput { path: PathBuf, source: io::Error },
    CannotWriteOutput { path: PathBuf, source: io::Error },
}

impl PipelineError {
    /// Line the failure was detected at, when one applies.
    pub fn line(&self) -> Option<usize> {
        match self {
            PipelineError::Lex(err) => err.line(),
            PipelineError::Syntax(err) => err.line(),
            _ => None,
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Lex(err) => err.fmt(f),
            PipelineError::Syntax(err) => err.fmt(f),
            PipelineError::CannotOpenInput { path, source } => {
                write!(f, "Could not open input file '{}': {}", path.display(), source)
            }
            PipelineError::CannotWriteOutput { path, source } => {
                write!(
                    f,
                    "Could not write token file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Lex(err) => Some(err),
            PipelineError::Syntax(err) => Some(err),
            PipelineError::CannotOpenInput { source, .. }
            | PipelineError::CannotWriteOutput { source, .. } => Some(source),
        }
    }
}

impl From<LexError> for PipelineError {
    fn from(err: LexError) -> Self {
        PipelineError::Lex(err)
    }
}

impl From<ParseError> for PipelineError {
    fn from(err: ParseError) -> Self {
        PipelineError::Syntax(err)
    }
}

/// Scan a source string, failing the run on any lexical error.
pub fn scan_source(source: &str) -> Result<ScanResult, PipelineError> {
    let result = Lexer::new(source).tokenize();
    match result.error {
        Some(err) => Err(err.into()),
        None => Ok(result),
    }
}

/// Parse a token sequence into an AST.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Node, PipelineError> {
    Ok(Parser::new(tokens).parse_program()?)
}

/// Run the full two-stage pipeline on one source file.
///
/// Mirrors the historical file handoff: the scanned tokens are written to
/// `tokens_path` and read back before parsing, so the interchange encoding is
/// exercised on every run. Returns the AST together with the source line
/// count and the number of tokens read back.
pub fn run_file(
    source_path: impl AsRef<Path>,
    tokens_path: impl AsRef<Path>,
) -> Result<(Node, usize, usize), PipelineError> {
    let source_path = source_path.as_ref();
    let tokens_path = tokens_path.as_ref();

    let source = fs::read_to_string(source_path).map_err(|err| PipelineError::CannotOpenInput {
        path: source_path.to_path_buf(),
        source: err,
    })?;

    let scanned = scan_source(&source)?;

    interchange::write_file(tokens_path, &scanned.tokens).map_err(|err| {
        PipelineError::CannotWriteOutput {
            path: tokens_path.to_path_buf(),
            source: err,
        }
    })?;

    let tokens = interchange::read_file(tokens_path).map_err(|err| {
        PipelineError::CannotOpenInput {
            path: tokens_path.to_path_buf(),
            source: err,
        }
    })?;
    let token_count = tokens.len();

    let tree = parse_tokens(tokens)?;
    Ok((tree, scanned.lines, token_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::NodeKind;
    use crate::parser::lexer::LexError;

    #[test]
    fn test_scan_source_rejects_empty_input() {
        let err = scan_source("").unwrap_err();
        assert!(matches!(err, PipelineError::Lex(LexError::EmptySource)));
    }

    #[test]
    fn test_run_file_round_trips_through_token_file() {
        let dir = std::env::temp_dir();
        let source_path = dir.join("cminus_driver_test.c");
        let tokens_path = dir.join("cminus_driver_test_tokens.txt");
        fs::write(&source_path, "int main ( ) { return 0 ; }\n").unwrap();

        let (tree, lines, token_count) = run_file(&source_path, &tokens_path).unwrap();
        let _ = fs::remove_file(&source_path);
        let _ = fs::remove_file(&tokens_path);

        assert_eq!(tree.kind, NodeKind::Program);
        assert_eq!(tree.children[0].kind, NodeKind::FunctionDefinition);
        assert_eq!(lines, 2);
        assert_eq!(token_count, 9);
    }

    #[test]
    fn test_run_file_missing_input() {
        let err = run_file("/nonexistent/input.c", "/tmp/unused_tokens.txt").unwrap_err();
        assert!(matches!(err, PipelineError::CannotOpenInput { .. }));
    }
}
