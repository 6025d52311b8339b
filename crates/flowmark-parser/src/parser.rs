//! Statement parser for flowmark.
//!
//! Consumes the concatenated token stream of a whole document strictly left
//! to right with one token of lookahead and produces a [`Program`].
//!
//! Uses recursive descent over a flat grammar:
//! ```text
//! program   := (call | stray-token)*
//! call      := Identifier "(" param* ")"
//! param     := NumberLiteral | StringLiteral | Identifier
//! ```

use crate::ast::{CallExpr, CallName, Program};
use crate::{ParameterProblem, ParseError};
use flowmark_lexer::{Scanner, SourceLine, Token, TokenKind};

/// Flowmark statement parser.
///
/// Holds an index cursor into the token stream; tokens are never revisited
/// once consumed.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a new parser for the given tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse source code into a program.
    pub fn parse(source: &str) -> Result<Program, ParseError> {
        let tokens = Scanner::tokenize(source)?;
        Parser::new(tokens).parse_program()
    }

    /// Parse already split source lines into a program.
    pub fn parse_lines(lines: &[SourceLine]) -> Result<Program, ParseError> {
        let tokens = Scanner::tokenize_lines(lines)?;
        Parser::new(tokens).parse_program()
    }

    /// Parse the whole token stream.
    ///
    /// Tokens that cannot start a statement are skipped; only identifiers
    /// open a call expression.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut expressions = Vec::new();

        while let Some(token) = self.advance() {
            if token.kind != TokenKind::Identifier {
                tracing::trace!(
                    line = token.line(),
                    kind = %token.kind,
                    "skipping token outside call expression"
                );
                continue;
            }
            expressions.push(self.parse_call_expr(token)?);
        }

        tracing::debug!(expressions = expressions.len(), "parsed program");
        Ok(Program::new(expressions))
    }

    // =========================================================================
    // Call expressions
    // =========================================================================

    /// Parse the rest of a call whose leading identifier was just consumed:
    /// ```text
    /// Rel(api, "reads", db)
    /// ```
    fn parse_call_expr(&mut self, head: Token) -> Result<CallExpr, ParseError> {
        let line = head.line();
        let name = CallName::from_identifier(&head.value).ok_or_else(|| {
            ParseError::UnknownCallExpression {
                name: head.value.clone(),
                line,
            }
        })?;

        self.expect_open_paren(name, line)?;
        let parameters = self.collect_parameters(name)?;
        self.expect_close_paren(name, line)?;

        validate_parameters(name, line, &parameters)?;

        Ok(CallExpr::new(name, line, parameters))
    }

    fn expect_open_paren(&mut self, name: CallName, line: usize) -> Result<(), ParseError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::OpenParen => {
                self.pos += 1;
                Ok(())
            }
            Some(token) => Err(ParseError::ExpectedOpenParen {
                name,
                found: Some(token.kind),
                line: token.line(),
            }),
            None => Err(ParseError::ExpectedOpenParen {
                name,
                found: None,
                line,
            }),
        }
    }

    /// Collect literal and identifier tokens up to (not including) the
    /// closing paren.
    fn collect_parameters(&mut self, name: CallName) -> Result<Vec<Token>, ParseError> {
        let mut parameters = Vec::new();

        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::CloseParen => break,
                TokenKind::NumberLiteral | TokenKind::StringLiteral | TokenKind::Identifier => {
                    parameters.push(token.clone());
                    self.pos += 1;
                }
                found => {
                    return Err(ParseError::UnexpectedParameterToken {
                        name,
                        found,
                        line: token.line(),
                    })
                }
            }
        }

        Ok(parameters)
    }

    fn expect_close_paren(&mut self, name: CallName, line: usize) -> Result<(), ParseError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::CloseParen => {
                self.pos += 1;
                Ok(())
            }
            Some(token) => Err(ParseError::ExpectedCloseParen {
                name,
                found: Some(token.kind),
                line: token.line(),
            }),
            None => Err(ParseError::UnterminatedCallExpression { name, line }),
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }
}

/// Check a parameter list against the call's signature: arity first, then
/// the kind of each position in order.
fn validate_parameters(
    name: CallName,
    line: usize,
    parameters: &[Token],
) -> Result<(), ParseError> {
    let signature = name.signature();

    if parameters.len() != signature.len() {
        return Err(ParseError::InvalidParameters {
            call: name,
            problem: ParameterProblem::Arity {
                expected: signature.len(),
                actual: parameters.len(),
            },
            line,
        });
    }

    for (position, (param, &expected)) in parameters.iter().zip(signature).enumerate() {
        if param.kind != expected {
            return Err(ParseError::InvalidParameters {
                call: name,
                problem: ParameterProblem::Kind {
                    position,
                    expected,
                    actual: param.kind,
                },
                line,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowmark_lexer::{LexerError, Span};
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Program {
        Parser::parse(source).unwrap()
    }

    fn parse_err(source: &str) -> ParseError {
        Parser::parse(source).unwrap_err()
    }

    fn params(expr: &CallExpr) -> Vec<(TokenKind, &str)> {
        expr.parameters
            .iter()
            .map(|t| (t.kind, t.value.as_str()))
            .collect()
    }

    fn tok(kind: TokenKind, value: &str, line: usize) -> Token {
        Token::new(kind, value, Span::new(0, 0, line, 1))
    }

    // =========================================================================
    // Empty / simple
    // =========================================================================

    #[test]
    fn test_empty_program() {
        assert!(parse("").is_empty());
        assert!(parse("\n   \n\t\n").is_empty());
    }

    #[test]
    fn test_entity() {
        let program = parse("Entity(api, \"API Gateway\")");
        assert_eq!(program.len(), 1);
        let expr = &program.expressions[0];
        assert_eq!(expr.name, CallName::Entity);
        assert_eq!(expr.line, 1);
        assert_eq!(
            params(expr),
            vec![
                (TokenKind::Identifier, "api"),
                (TokenKind::StringLiteral, "API Gateway"),
            ]
        );
    }

    #[test]
    fn test_every_node_call() {
        let program = parse(
            "Entity(a \"A\")\nDatabase(b \"B\")\nQueue(c \"C\")\nDecision(d \"D\")",
        );
        let names: Vec<CallName> = program.expressions.iter().map(|e| e.name).collect();
        assert_eq!(
            names,
            vec![
                CallName::Entity,
                CallName::Database,
                CallName::Queue,
                CallName::Decision,
            ]
        );
    }

    #[test]
    fn test_rel() {
        let program = parse("Rel(api, \"reads\", db)");
        let expr = &program.expressions[0];
        assert_eq!(expr.name, CallName::Rel);
        assert_eq!(
            params(expr),
            vec![
                (TokenKind::Identifier, "api"),
                (TokenKind::StringLiteral, "reads"),
                (TokenKind::Identifier, "db"),
            ]
        );
    }

    #[test]
    fn test_source_order_and_lines() {
        let program = parse("Entity(a, \"A\")\n\nRel(a, \"to\", b)\nQueue(q, \"Q\")");
        let summary: Vec<(CallName, usize)> = program
            .expressions
            .iter()
            .map(|e| (e.name, e.line))
            .collect();
        assert_eq!(
            summary,
            vec![(CallName::Entity, 1), (CallName::Rel, 3), (CallName::Queue, 4)]
        );
    }

    #[test]
    fn test_undeclared_reference_is_accepted() {
        let program = parse("Entity(a, \"A\")\nRel(a, \"to\", b)");
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn test_parse_lines() {
        let lines = vec![
            SourceLine::new("Entity(a \"A\")", 10),
            SourceLine::new("Rel(a \"x\" b)", 11),
        ];
        let program = Parser::parse_lines(&lines).unwrap();
        assert_eq!(program.expressions[0].line, 10);
        assert_eq!(program.expressions[1].line, 11);
    }

    // =========================================================================
    // Leniency at statement boundaries
    // =========================================================================

    #[test]
    fn test_stray_tokens_skipped() {
        let program = parse("42 \"note\"\n(\nEntity(a \"A\")");
        assert_eq!(program.len(), 1);
        assert_eq!(program.expressions[0].name, CallName::Entity);
    }

    #[test]
    fn test_stray_close_paren_skipped() {
        let tokens = vec![
            tok(TokenKind::CloseParen, ")", 1),
            tok(TokenKind::Identifier, "Entity", 2),
            tok(TokenKind::OpenParen, "(", 2),
            tok(TokenKind::Identifier, "a", 2),
            tok(TokenKind::StringLiteral, "A", 2),
            tok(TokenKind::CloseParen, ")", 2),
        ];
        let program = Parser::new(tokens).parse_program().unwrap();
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn test_call_split_across_lines_is_joined() {
        let program = parse("Entity\n(a \"A\")");
        assert_eq!(program.len(), 1);
        assert_eq!(program.expressions[0].line, 1);
    }

    // =========================================================================
    // Errors: vocabulary and parens
    // =========================================================================

    #[test]
    fn test_unknown_call_expression() {
        assert_eq!(
            parse_err("Foo(a, \"b\")"),
            ParseError::UnknownCallExpression {
                name: "Foo".into(),
                line: 1,
            }
        );
    }

    #[test]
    fn test_parameter_identifier_is_not_a_statement() {
        // `a` is consumed as a parameter, never looked up in the vocabulary
        assert_eq!(parse("Entity(a \"b\")").len(), 1);
    }

    #[test]
    fn test_expected_open_paren() {
        assert_eq!(
            parse_err("Entity \"a\""),
            ParseError::ExpectedOpenParen {
                name: CallName::Entity,
                found: Some(TokenKind::StringLiteral),
                line: 1,
            }
        );
    }

    #[test]
    fn test_identifier_at_end_of_input() {
        assert_eq!(
            parse_err("Entity(a \"A\")\nDecision"),
            ParseError::ExpectedOpenParen {
                name: CallName::Decision,
                found: None,
                line: 2,
            }
        );
    }

    #[test]
    fn test_unterminated_call_expression() {
        assert_eq!(
            parse_err("Entity(a, \"b\""),
            ParseError::UnterminatedCallExpression {
                name: CallName::Entity,
                line: 1,
            }
        );
    }

    #[test]
    fn test_nested_call_rejected() {
        assert_eq!(
            parse_err("Entity(a \"A\" Queue(q \"Q\"))"),
            ParseError::Lexer(LexerError::UnexpectedToken {
                found: ')',
                line: 1,
                column: 26,
            })
        );
    }

    #[test]
    fn test_open_paren_in_parameters() {
        assert_eq!(
            parse_err("Entity(a \"b\"\nRel(a \"x\" b)"),
            ParseError::UnexpectedParameterToken {
                name: CallName::Entity,
                found: TokenKind::OpenParen,
                line: 2,
            }
        );
    }

    #[test]
    fn test_quote_token_in_parameters() {
        let tokens = vec![
            tok(TokenKind::Identifier, "Entity", 1),
            tok(TokenKind::OpenParen, "(", 1),
            tok(TokenKind::Quote, "\"", 1),
        ];
        let err = Parser::new(tokens).parse_program().unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedParameterToken {
                name: CallName::Entity,
                found: TokenKind::Quote,
                line: 1,
            }
        );
    }

    #[test]
    fn test_lexer_errors_propagate() {
        let err = parse_err("Entity(a \"A\")\nEntity(b # \"B\")");
        assert_eq!(
            err,
            ParseError::Lexer(LexerError::UnexpectedToken {
                found: '#',
                line: 2,
                column: 10,
            })
        );
        assert_eq!(err.line(), 2);
    }

    // =========================================================================
    // Errors: parameter validation
    // =========================================================================

    #[test]
    fn test_entity_one_parameter() {
        assert_eq!(
            parse_err("Entity(a)"),
            ParseError::InvalidParameters {
                call: CallName::Entity,
                problem: ParameterProblem::Arity {
                    expected: 2,
                    actual: 1,
                },
                line: 1,
            }
        );
    }

    #[test]
    fn test_zero_parameters() {
        assert_eq!(
            parse_err("Queue()"),
            ParseError::InvalidParameters {
                call: CallName::Queue,
                problem: ParameterProblem::Arity {
                    expected: 2,
                    actual: 0,
                },
                line: 1,
            }
        );
    }

    #[test]
    fn test_rel_two_parameters() {
        assert_eq!(
            parse_err("\nRel(a \"x\")"),
            ParseError::InvalidParameters {
                call: CallName::Rel,
                problem: ParameterProblem::Arity {
                    expected: 3,
                    actual: 2,
                },
                line: 2,
            }
        );
    }

    #[test]
    fn test_entity_three_parameters() {
        let err = parse_err("Database(a \"A\" b)");
        assert!(matches!(
            err,
            ParseError::InvalidParameters {
                call: CallName::Database,
                problem: ParameterProblem::Arity {
                    expected: 2,
                    actual: 3
                },
                ..
            }
        ));
    }

    #[test]
    fn test_id_must_be_identifier() {
        assert_eq!(
            parse_err("Decision(\"d\" \"D\")"),
            ParseError::InvalidParameters {
                call: CallName::Decision,
                problem: ParameterProblem::Kind {
                    position: 0,
                    expected: TokenKind::Identifier,
                    actual: TokenKind::StringLiteral,
                },
                line: 1,
            }
        );
    }

    #[test]
    fn test_label_must_be_string() {
        assert_eq!(
            parse_err("Entity(a 42)"),
            ParseError::InvalidParameters {
                call: CallName::Entity,
                problem: ParameterProblem::Kind {
                    position: 1,
                    expected: TokenKind::StringLiteral,
                    actual: TokenKind::NumberLiteral,
                },
                line: 1,
            }
        );
    }

    #[test]
    fn test_rel_target_must_be_identifier() {
        assert_eq!(
            parse_err("Rel(a \"x\" \"b\")"),
            ParseError::InvalidParameters {
                call: CallName::Rel,
                problem: ParameterProblem::Kind {
                    position: 2,
                    expected: TokenKind::Identifier,
                    actual: TokenKind::StringLiteral,
                },
                line: 1,
            }
        );
    }

    #[test]
    fn test_first_error_wins() {
        let err = parse_err("Entity(a)\nFoo(b \"B\")");
        assert_eq!(err.line(), 1);
        assert!(matches!(err, ParseError::InvalidParameters { .. }));
    }
}
