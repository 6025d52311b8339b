//! Flowmark Parser
//!
//! Parses the flat token stream from `flowmark-lexer` into a [`Program`]:
//! an ordered list of validated call expressions such as
//! `Entity(api, "API")` or `Rel(api, "reads", db)`.
//!
//! Each call name has a fixed parameter signature which is checked while
//! parsing, so every [`CallExpr`] handed to the generator is well-formed.

pub mod ast;
pub mod parser;

use std::fmt;

pub use ast::{CallExpr, CallName, Program};
pub use flowmark_lexer::LexerError;
pub use parser::Parser;

use flowmark_lexer::TokenKind;

/// Parser error with the line it was raised on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexer(#[from] LexerError),

    #[error("Parse error at line {line}: Unknown call expression '{name}'")]
    UnknownCallExpression { name: String, line: usize },

    #[error("Parse error at line {line}: Expected '(' after {name}, found {}", Found(.found))]
    ExpectedOpenParen {
        name: CallName,
        found: Option<TokenKind>,
        line: usize,
    },

    #[error("Parse error at line {line}: Expected ')' to close {name}, found {}", Found(.found))]
    ExpectedCloseParen {
        name: CallName,
        found: Option<TokenKind>,
        line: usize,
    },

    #[error("Parse error at line {line}: Unexpected {found} token in {name} parameters")]
    UnexpectedParameterToken {
        name: CallName,
        found: TokenKind,
        line: usize,
    },

    #[error("Parse error at line {line}: Unterminated {name} call expression, missing ')'")]
    UnterminatedCallExpression { name: CallName, line: usize },

    #[error("Parse error at line {line}: Invalid {call} parameters: {problem}")]
    InvalidParameters {
        call: CallName,
        problem: ParameterProblem,
        line: usize,
    },
}

impl ParseError {
    /// Line number the error was raised on.
    pub fn line(&self) -> usize {
        match self {
            ParseError::Lexer(e) => e.line(),
            ParseError::UnknownCallExpression { line, .. }
            | ParseError::ExpectedOpenParen { line, .. }
            | ParseError::ExpectedCloseParen { line, .. }
            | ParseError::UnexpectedParameterToken { line, .. }
            | ParseError::UnterminatedCallExpression { line, .. }
            | ParseError::InvalidParameters { line, .. } => *line,
        }
    }
}

/// Why a call's parameter list does not match its signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParameterProblem {
    #[error("expected {expected} parameters, found {actual}")]
    Arity { expected: usize, actual: usize },

    #[error("parameter {position} must be {expected}, found {actual}")]
    Kind {
        position: usize,
        expected: TokenKind,
        actual: TokenKind,
    },
}

/// Display helper for "what was there instead" in error messages.
struct Found<'a>(&'a Option<TokenKind>);

impl fmt::Display for Found<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(kind) => write!(f, "{kind}"),
            None => f.write_str("end of input"),
        }
    }
}
