//! Flowmark Lexer
//!
//! Tokenizes flowmark source into a flat stream of tokens.
//! Scanning is line-oriented: every line is tokenized on its own and the
//! per-line outputs are concatenated in line order, so no token ever spans
//! a line break.
//!
//! # Example
//!
//! ```
//! use flowmark_lexer::{Scanner, TokenKind};
//!
//! let tokens = Scanner::tokenize("Entity(api, \"API\")").unwrap();
//! assert_eq!(tokens.len(), 5);
//! assert_eq!(tokens[0].kind, TokenKind::Identifier);
//! ```

pub mod scanner;
pub mod source;
pub mod token;

pub use scanner::Scanner;
pub use source::{source_lines, SourceLine};
pub use token::{Span, Token, TokenKind};

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    /// A character outside every recognized class, or trailing
    /// non-whitespace after a `)`.
    #[error("Lexer error at line {line}, column {column}: Unexpected token: '{found}'")]
    UnexpectedToken {
        found: char,
        line: usize,
        column: usize,
    },

    /// A `"` with no closing quote before the end of the line.
    #[error("Lexer error at line {line}, column {column}: Unterminated string")]
    UnterminatedString { line: usize, column: usize },
}

impl LexerError {
    /// Line number the error was raised on.
    pub fn line(&self) -> usize {
        match self {
            LexerError::UnexpectedToken { line, .. } | LexerError::UnterminatedString { line, .. } => {
                *line
            }
        }
    }

    /// Column of the offending character.
    pub fn column(&self) -> usize {
        match self {
            LexerError::UnexpectedToken { column, .. }
            | LexerError::UnterminatedString { column, .. } => *column,
        }
    }
}
