//! Lexer (tokenizer) for C-subset source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser, in a single left-to-right pass. Unlike most lexers, comments are
//! not discarded: they are emitted as tokens of their own classes so that the
//! interchange file records them, and the parser filters them out instead.

use rustc_hash::FxHashSet;
use std::fmt;
use std::str::FromStr;

/// The closed set of token classes produced by the scanner.
///
/// The `Display`/`FromStr` names are the exact strings used in the
/// `<CLASS, VALUE, LINE>` interchange format, so the two impls must stay in
/// sync with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Keyword,
    Identifier,
    NumericConstant,
    Operator,
    SpecialCharacter,
    PreprocessorDirective,
    CharLiteral,
    SingleLineComment,
    MultiLineComment,
}

impl TokenClass {
    /// Comment classes are kept in the token stream but are invisible to the
    /// grammar.
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TokenClass::SingleLineComment | TokenClass::MultiLineComment
        )
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenClass::Keyword => "KEYWORD",
            TokenClass::Identifier => "IDENTIFIER",
            TokenClass::NumericConstant => "NUMERIC CONSTANT",
            TokenClass::Operator => "OPERATOR",
            TokenClass::SpecialCharacter => "SPECIAL CHARACTER",
            TokenClass::PreprocessorDirective => "PREPROCESSOR DIRECTIVE",
            TokenClass::CharLiteral => "CHAR_LITERAL",
            TokenClass::SingleLineComment => "Single-Line Comment",
            TokenClass::MultiLineComment => "Multi-Line Comment",
        };
        f.write_str(name)
    }
}

/// Error returned by [`TokenClass::from_str`] for a name outside the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTokenClass(pub String);

impl fmt::Display for UnknownTokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown token class '{}'", self.0)
    }
}

impl std::error::Error for UnknownTokenClass {}

impl FromStr for TokenClass {
    type Err = UnknownTokenClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "KEYWORD" => Ok(TokenClass::Keyword),
            "IDENTIFIER" => Ok(TokenClass::Identifier),
            "NUMERIC CONSTANT" => Ok(TokenClass::NumericConstant),
            "OPERATOR" => Ok(TokenClass::Operator),
            "SPECIAL CHARACTER" => Ok(TokenClass::SpecialCharacter),
            "PREPROCESSOR DIRECTIVE" => Ok(TokenClass::PreprocessorDirective),
            "CHAR_LITERAL" => Ok(TokenClass::CharLiteral),
            "Single-Line Comment" => Ok(TokenClass::SingleLineComment),
            "Multi-Line Comment" => Ok(TokenClass::MultiLineComment),
            _ => Err(UnknownTokenClass(s.to_string())),
        }
    }
}

/// One classified token.
///
/// `lexeme` is the exact source substring (fixed markers for comments),
/// `line` is the 1-based line where the token starts. Tokens are created once
/// by the scanner and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub lexeme: String,
    pub class: TokenClass,
    pub line: usize,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, class: TokenClass, line: usize) -> Self {
        Self {
            lexeme: lexeme.into(),
            class,
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with value '{}'", self.class, self.lexeme)
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// Scanning halted at the first character no rule matched.
    UnexpectedCharacter { ch: char, line: usize },
    /// A `/*` comment ran past the end of the input.
    UnterminatedComment { start_line: usize },
    /// The source buffer was empty; reported explicitly rather than scanned
    /// into zero tokens.
    EmptySource,
}

impl LexError {
    /// Line the error was detected at, if one applies.
    pub fn line(&self) -> Option<usize> {
        match self {
            LexError::UnexpectedCharacter { line, .. } => Some(*line),
            LexError::UnterminatedComment { start_line } => Some(*start_line),
            LexError::EmptySource => None,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter { ch, line } => {
                write!(f, "Lexical error at line {}: unexpected character '{}'", line, ch)
            }
            LexError::UnterminatedComment { start_line } => {
                write!(
                    f,
                    "Lexical error: unterminated multi-line comment starting at line {}",
                    start_line
                )
            }
            LexError::EmptySource => {
                write!(f, "Lexical error: the source program is empty, no code to scan")
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Outcome of a full scan.
///
/// On failure the tokens produced before the error are retained, together
/// with the line count reached, so callers can still inspect the prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    /// Number of source lines seen by the scanner.
    pub lines: usize,
    pub error: Option<LexError>,
}

impl ScanResult {
    /// Collapse to a plain `Result`, discarding any partial token prefix on
    /// failure.
    pub fn into_tokens(self) -> Result<Vec<Token>, LexError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.tokens),
        }
    }
}

/// 3-character operators, tried first (longest match wins).
const OPERATORS_3: &[&str] = &["<<=", ">>="];

/// 2-character operators.
const OPERATORS_2: &[&str] = &[
    "++", "--", "<<", ">>", "==", "&&", "||", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=",
    "!=", ">=", "<=",
];

/// 1-character operators.
const OPERATORS_1: &[char] = &['+', '-', '*', '/', '=', '<', '>', '%', '^', '|', '&', '~', '!'];

/// Single characters emitted as `SPECIAL CHARACTER` tokens. `#` never
/// actually reaches this table because preprocessor capture runs first.
const SPECIAL_CHARS: &[char] = &['(', ')', '{', '}', ';', ',', '#', '.', '[', ']'];

/// The recognized C keyword set.
const KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "int", "long", "register", "return", "short",
    "signed", "sizeof", "static", "struct", "switch", "typedef", "union", "unsigned", "void",
    "volatile", "while",
];

/// Lexer for C-subset source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    keywords: FxHashSet<&'static str>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            keywords: KEYWORDS.iter().copied().collect(),
        }
    }

    /// Tokenize the entire input in one pass.
    ///
    /// Scanning stops at the first error; tokens already produced are kept in
    /// the returned [`ScanResult`] alongside the error.
    pub fn tokenize(&mut self) -> ScanResult {
        let mut tokens = Vec::new();

        if self.input.is_empty() {
            return ScanResult {
                tokens,
                lines: 0,
                error: Some(LexError::EmptySource),
            };
        }

        let error = loop {
            let ch = match self.peek() {
                Some(ch) => ch,
                None => break None,
            };

            // Newlines drive the line counter; all other whitespace is noise.
            if ch == '\n' {
                self.line += 1;
                self.position += 1;
                continue;
            }
            if ch.is_whitespace() {
                self.position += 1;
                continue;
            }

            if ch == '/' && self.peek_ahead(1) == Some('/') {
                tokens.push(self.line_comment());
                continue;
            }
            if ch == '/' && self.peek_ahead(1) == Some('*') {
                match self.block_comment() {
                    Ok(token) => {
                        tokens.push(token);
                        continue;
                    }
                    Err(err) => break Some(err),
                }
            }

            if ch == '#' {
                tokens.push(self.preprocessor_directive());
                continue;
            }

            if let Some(token) = self.operator() {
                tokens.push(token);
                continue;
            }

            // A digit, or a '.' immediately followed by a digit, starts a
            // numeric constant; this must be checked before the special
            // character table or a leading '.' would never reach it.
            if ch.is_ascii_digit()
                || (ch == '.' && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()))
            {
                self.numeric_constant(&mut tokens);
                continue;
            }

            if SPECIAL_CHARS.contains(&ch) || ch == '\'' {
                self.special_character(ch, &mut tokens);
                continue;
            }

            if ch.is_ascii_alphabetic() || ch == '_' {
                tokens.push(self.identifier_or_keyword());
                continue;
            }

            break Some(LexError::UnexpectedCharacter {
                ch,
                line: self.line,
            });
        };

        ScanResult {
            tokens,
            lines: self.line,
            error,
        }
    }

    /// Consume a `//` comment up to (not including) the newline.
    ///
    /// The body text is not retained; the token's lexeme is the fixed marker
    /// `"//"`.
    fn line_comment(&mut self) -> Token {
        let start_line = self.line;
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.position += 1;
        }
        Token::new("//", TokenClass::SingleLineComment, start_line)
    }

    /// Consume a `/* ... */` comment, counting interior newlines.
    ///
    /// The lexeme is the fixed marker `"/* .. */"` tagged with the line the
    /// comment starts on.
    fn block_comment(&mut self) -> Result<Token, LexError> {
        let start_line = self.line;
        self.position += 2; // past "/*"

        loop {
            match self.peek() {
                Some('*') if self.peek_ahead(1) == Some('/') => {
                    self.position += 2;
                    return Ok(Token::new("/* .. */", TokenClass::MultiLineComment, start_line));
                }
                Some('\n') => {
                    self.line += 1;
                    self.position += 1;
                }
                Some(_) => self.position += 1,
                None => return Err(LexError::UnterminatedComment { start_line }),
            }
        }
    }

    /// Capture a `#...` directive verbatim up to the end of the line.
    fn preprocessor_directive(&mut self) -> Token {
        let line = self.line;
        let mut directive = String::new();
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            directive.push(ch);
            self.position += 1;
        }
        Token::new(directive, TokenClass::PreprocessorDirective, line)
    }

    /// Longest-match operator recognition: try a 3-character substring, then
    /// 2, then 1; the first table hit wins.
    fn operator(&mut self) -> Option<Token> {
        for len in [3, 2] {
            if self.position + len <= self.input.len() {
                let slice: String = self.input[self.position..self.position + len].iter().collect();
                let table = if len == 3 { OPERATORS_3 } else { OPERATORS_2 };
                if table.contains(&slice.as_str()) {
                    self.position += len;
                    return Some(Token::new(slice, TokenClass::Operator, self.line));
                }
            }
        }

        let ch = self.peek()?;
        if OPERATORS_1.contains(&ch) {
            self.position += 1;
            return Some(Token::new(ch.to_string(), TokenClass::Operator, self.line));
        }
        None
    }

    /// Emit one `SPECIAL CHARACTER` token, plus the synthetic `CHAR_LITERAL`
    /// heuristic for quotes: `'` followed by exactly one alphanumeric and a
    /// non-alphanumeric, non-underscore character also yields that single
    /// character as a `CHAR_LITERAL` token. This is not full character-literal
    /// lexing; the closing quote comes out as its own special character.
    fn special_character(&mut self, ch: char, tokens: &mut Vec<Token>) {
        tokens.push(Token::new(ch.to_string(), TokenClass::SpecialCharacter, self.line));
        if ch == '\'' {
            let next = self.peek_ahead(1);
            let after = self.peek_ahead(2);
            if next.is_some_and(|c| c.is_ascii_alphanumeric())
                && !after.is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                if let Some(literal) = next {
                    tokens.push(Token::new(
                        literal.to_string(),
                        TokenClass::CharLiteral,
                        self.line,
                    ));
                }
                self.position += 1;
            }
        }
        self.position += 1;
    }

    /// Scan a maximal run of letters, digits, and underscores, classifying it
    /// against the keyword set.
    fn identifier_or_keyword(&mut self) -> Token {
        let line = self.line;
        let mut word = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                word.push(ch);
                self.position += 1;
            } else {
                break;
            }
        }
        let class = if self.keywords.contains(word.as_str()) {
            TokenClass::Keyword
        } else {
            TokenClass::Identifier
        };
        Token::new(word, class, line)
    }

    /// Scan numeric constants from a run of digits and radix points.
    ///
    /// At most one radix point is consumed per constant: once a '.' is seen,
    /// the token closes after the following maximal digit run and scanning
    /// resumes fresh, so a later '.' starts a brand-new constant rather than
    /// erroring. `0.2222.3333` therefore yields `"0.2222"` and `".3333"`.
    fn numeric_constant(&mut self, tokens: &mut Vec<Token>) {
        let line = self.line;
        let mut number = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.position += 1;
            } else if ch == '.' {
                number.push(ch);
                self.position += 1;
                while let Some(digit) = self.peek() {
                    if !digit.is_ascii_digit() {
                        break;
                    }
                    number.push(digit);
                    self.position += 1;
                }
                tokens.push(Token::new(number, TokenClass::NumericConstant, line));
                number = String::new();
            } else {
                break;
            }
        }
        if !number.is_empty() {
            tokens.push(Token::new(number, TokenClass::NumericConstant, line));
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }
}
