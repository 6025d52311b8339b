use crate::source::{source_lines, SourceLine};
use crate::token::{Span, Token, TokenKind};
use crate::LexerError;

/// Flowmark source scanner.
///
/// Tokenizes a single source line, left to right, with the current
/// character as the only lookahead. Runs of digits, letters and string
/// interiors are consumed greedily until the character class changes.
///
/// Follows the usual hand-written scanner layout:
/// - `Vec<char>` source for index-based navigation
/// - Position tracking on every token
/// - First error aborts the scan
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
}

impl Scanner {
    /// Create a new scanner for one source line.
    pub fn new(line: &SourceLine) -> Self {
        Self {
            chars: line.text.chars().collect(),
            pos: 0,
            line: line.line_number,
            tokens: Vec::new(),
        }
    }

    /// Tokenize a whole document.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexerError> {
        Self::tokenize_lines(&source_lines(source))
    }

    /// Tokenize every line in order and concatenate the results.
    pub fn tokenize_lines(lines: &[SourceLine]) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        for line in lines {
            tokens.extend(Self::tokenize_line(line)?);
        }
        tracing::debug!(lines = lines.len(), tokens = tokens.len(), "tokenized source");
        Ok(tokens)
    }

    /// Tokenize a single line.
    pub fn tokenize_line(line: &SourceLine) -> Result<Vec<Token>, LexerError> {
        let mut scanner = Scanner::new(line);
        scanner.scan_tokens()?;
        Ok(scanner.tokens)
    }

    /// Scan all tokens from the line.
    fn scan_tokens(&mut self) -> Result<(), LexerError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }
        Ok(())
    }

    /// Scan the next token.
    fn scan_token(&mut self) -> Result<(), LexerError> {
        let ch = self.peek();

        match ch {
            '(' => {
                self.emit_single(TokenKind::OpenParen, ch);
                Ok(())
            }
            ')' => {
                self.emit_single(TokenKind::CloseParen, ch);
                self.expect_trailing_whitespace()
            }
            // Commas separate parameters and carry no meaning of their own
            c if is_whitespace(c) || c == ',' => {
                self.advance();
                Ok(())
            }
            '0'..='9' => {
                self.scan_run(TokenKind::NumberLiteral, |c| c.is_ascii_digit());
                Ok(())
            }
            c if c.is_ascii_alphabetic() => {
                self.scan_run(TokenKind::Identifier, |c| c.is_ascii_alphabetic());
                Ok(())
            }
            '"' => self.scan_string(),
            _ => Err(self.unexpected(ch)),
        }
    }

    // --- Scanners ---

    /// After a `)`, only whitespace may follow on the line. Every remaining
    /// character is checked on its own.
    fn expect_trailing_whitespace(&mut self) -> Result<(), LexerError> {
        while !self.is_at_end() {
            let c = self.peek();
            if !is_whitespace(c) {
                return Err(self.unexpected(c));
            }
            self.advance();
        }
        Ok(())
    }

    /// Consume a maximal run of characters matching `accept`.
    fn scan_run(&mut self, kind: TokenKind, accept: impl Fn(char) -> bool) {
        let start = self.pos;

        let mut value = String::new();
        while !self.is_at_end() && accept(self.peek()) {
            value.push(self.peek());
            self.advance();
        }

        let span = Span::new(start, self.pos, self.line, start + 1);
        self.tokens.push(Token::new(kind, value, span));
    }

    /// Scan a string literal. Quotes are dropped and the interior is kept
    /// verbatim; there are no escape sequences.
    fn scan_string(&mut self) -> Result<(), LexerError> {
        let start = self.pos;
        self.advance(); // consume opening quote

        let mut value = String::new();
        while !self.is_at_end() && self.peek() != '"' {
            value.push(self.peek());
            self.advance();
        }

        if self.is_at_end() {
            return Err(LexerError::UnterminatedString {
                line: self.line,
                column: start + 1,
            });
        }

        self.advance(); // consume closing quote

        let span = Span::new(start, self.pos, self.line, start + 1);
        self.tokens
            .push(Token::new(TokenKind::StringLiteral, value, span));
        Ok(())
    }

    // --- Helpers ---

    fn emit_single(&mut self, kind: TokenKind, ch: char) {
        let span = Span::new(self.pos, self.pos + 1, self.line, self.pos + 1);
        self.tokens.push(Token::new(kind, ch.to_string(), span));
        self.advance();
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.pos]
        }
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn unexpected(&self, found: char) -> LexerError {
        LexerError::UnexpectedToken {
            found,
            line: self.line,
            column: self.pos + 1,
        }
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n')
}
