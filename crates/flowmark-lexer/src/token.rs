use std::fmt;

/// A position in source text, tracking line and column for error reporting.
///
/// `start` and `end` are char offsets within the token's line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Token classification for flowmark source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A run of ASCII digits.
    NumberLiteral,
    /// The text between two `"` delimiters.
    StringLiteral,
    /// A run of ASCII letters.
    Identifier,
    OpenParen,
    CloseParen,
    /// Reserved. The scanner never produces it.
    Quote,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::NumberLiteral => "NumberLiteral",
            TokenKind::StringLiteral => "StringLiteral",
            TokenKind::Identifier => "Identifier",
            TokenKind::OpenParen => "OpenParen",
            TokenKind::CloseParen => "CloseParen",
            TokenKind::Quote => "Quote",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token produced by the flowmark lexer.
///
/// `value` is the token text: `(` and `)` for parens, the digits of a number,
/// the letters of an identifier, and the unquoted interior of a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }

    /// 1-based line the token was scanned from.
    pub fn line(&self) -> usize {
        self.span.line
    }
}
