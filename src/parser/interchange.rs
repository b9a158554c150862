//! Textual token interchange format
//!
//! The scanner and the parser are decoupled through a line-oriented text
//! file (`tokens.txt` by convention): one token per line, in the form
//!
//! ```text
//! <CLASS, VALUE, LINE>
//! ```
//!
//! with the literal `", "` separator between fields. Decoding locates the
//! first and last comma of each line, which means the format round-trips any
//! token sequence whose lexemes contain no comma; comma-bearing values are
//! out of contract and are not repaired here.

use super::lexer::{Token, TokenClass};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Encode a token sequence, one `<CLASS, VALUE, LINE>` line per token.
pub fn encode(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&format!(
            "<{}, {}, {}>\n",
            token.class, token.lexeme, token.line
        ));
    }
    out
}

/// Decode an interchange text back into tokens.
///
/// Malformed lines (too short, fewer than two distinct commas, an unknown
/// class name, or an unparseable line number) are skipped with a warning on
/// stderr; they never abort the decode.
pub fn decode(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for line in text.lines() {
        if line.len() < 5 {
            continue;
        }

        let (first_comma, last_comma) = match (line.find(','), line.rfind(',')) {
            (Some(first), Some(last)) if first != last => (first, last),
            _ => {
                eprintln!("Warning: Malformed token line, skipping: {}", line);
                continue;
            }
        };

        let class_str = line.get(1..first_comma);
        let value = line.get(first_comma + 2..last_comma);
        let line_str = line
            .get(last_comma + 2..)
            .map(|s| s.trim_end().trim_end_matches('>'));

        let (class_str, value, line_str) = match (class_str, value, line_str) {
            (Some(c), Some(v), Some(l)) => (c, v, l),
            _ => {
                eprintln!("Warning: Malformed token line, skipping: {}", line);
                continue;
            }
        };

        let class: TokenClass = match class_str.parse() {
            Ok(class) => class,
            Err(_) => {
                eprintln!(
                    "Warning: Unknown token class '{}', skipping line: {}",
                    class_str, line
                );
                continue;
            }
        };

        let line_number: usize = match line_str.parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!(
                    "Warning: Malformed line number '{}', skipping line: {}",
                    line_str, line
                );
                continue;
            }
        };

        tokens.push(Token::new(value, class, line_number));
    }

    tokens
}

/// Write the encoded token sequence to a file.
pub fn write_file(path: impl AsRef<Path>, tokens: &[Token]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(encode(tokens).as_bytes())
}

/// Read a token file back into a sequence, skipping malformed lines.
pub fn read_file(path: impl AsRef<Path>) -> io::Result<Vec<Token>> {
    let text = fs::read_to_string(path)?;
    Ok(decode(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    #[test]
    fn test_encode_format() {
        let tokens = vec![
            Token::new("int", TokenClass::Keyword, 1),
            Token::new("x", TokenClass::Identifier, 2),
        ];

        assert_eq!(encode(&tokens), "<KEYWORD, int, 1>\n<IDENTIFIER, x, 2>\n");
    }

    #[test]
    fn test_round_trip() {
        let source = "#include <stdio.h>\n// note\nint main() { return 'a' + 0.5; }\n";
        let tokens = Lexer::new(source).tokenize().into_tokens().unwrap();

        assert_eq!(decode(&encode(&tokens)), tokens);
    }

    #[test]
    fn test_decode_skips_short_and_malformed_lines() {
        let text = "\n<,>\njunk line with no commas\n<KEYWORD, int, 1>\n";
        let tokens = decode(text);

        assert_eq!(tokens, vec![Token::new("int", TokenClass::Keyword, 1)]);
    }

    #[test]
    fn test_decode_skips_bad_line_number() {
        let text = "<KEYWORD, int, abc>\n<IDENTIFIER, x, 7>\n";
        let tokens = decode(text);

        assert_eq!(tokens, vec![Token::new("x", TokenClass::Identifier, 7)]);
    }

    #[test]
    fn test_decode_skips_unknown_class() {
        let text = "<STRING LITERAL, hi, 3>\n<OPERATOR, +, 3>\n";
        let tokens = decode(text);

        assert_eq!(tokens, vec![Token::new("+", TokenClass::Operator, 3)]);
    }

    #[test]
    fn test_file_round_trip() {
        let tokens = Lexer::new("int x = 1;").tokenize().into_tokens().unwrap();
        let path = std::env::temp_dir().join("cminus_interchange_test.txt");

        write_file(&path, &tokens).unwrap();
        let loaded = read_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, tokens);
    }
}
