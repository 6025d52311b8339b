//! Abstract Syntax Tree for flowmark.
//!
//! The grammar is flat: a program is a list of call expressions, one per
//! statement, with no nesting and no references between them.

use std::fmt;

use flowmark_lexer::{Token, TokenKind};

/// A complete flowmark program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub expressions: Vec<CallExpr>,
}

impl Program {
    pub fn new(expressions: Vec<CallExpr>) -> Self {
        Self { expressions }
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

/// The fixed vocabulary of call expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallName {
    /// `Entity(id, "label")`, a plain box.
    Entity,
    /// `Database(id, "label")`, a cylinder.
    Database,
    /// `Rel(from, "label", to)`, a labelled edge.
    Rel,
    /// `Queue(id, "label")`, a subroutine box.
    Queue,
    /// `Decision(id, "label")`, a rhombus.
    Decision,
}

const NODE_SIGNATURE: &[TokenKind] = &[TokenKind::Identifier, TokenKind::StringLiteral];
const REL_SIGNATURE: &[TokenKind] = &[
    TokenKind::Identifier,
    TokenKind::StringLiteral,
    TokenKind::Identifier,
];

impl CallName {
    pub const ALL: [CallName; 5] = [
        CallName::Entity,
        CallName::Database,
        CallName::Rel,
        CallName::Queue,
        CallName::Decision,
    ];

    /// Look up a call name by its exact (case-sensitive) spelling.
    pub fn from_identifier(ident: &str) -> Option<Self> {
        match ident {
            "Entity" => Some(CallName::Entity),
            "Database" => Some(CallName::Database),
            "Rel" => Some(CallName::Rel),
            "Queue" => Some(CallName::Queue),
            "Decision" => Some(CallName::Decision),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CallName::Entity => "Entity",
            CallName::Database => "Database",
            CallName::Rel => "Rel",
            CallName::Queue => "Queue",
            CallName::Decision => "Decision",
        }
    }

    /// Required token kind of each parameter position.
    pub fn signature(self) -> &'static [TokenKind] {
        match self {
            CallName::Entity | CallName::Database | CallName::Queue | CallName::Decision => {
                NODE_SIGNATURE
            }
            CallName::Rel => REL_SIGNATURE,
        }
    }
}

impl fmt::Display for CallName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated call expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    pub name: CallName,
    /// Line of the leading identifier.
    pub line: usize,
    /// Parameters in source order. Kinds match `name.signature()`.
    pub parameters: Vec<Token>,
}

impl CallExpr {
    pub fn new(name: CallName, line: usize, parameters: Vec<Token>) -> Self {
        Self {
            name,
            line,
            parameters,
        }
    }

    /// Text of the parameter at `index`, or `""` when out of range.
    pub fn param(&self, index: usize) -> &str {
        self.parameters
            .get(index)
            .map_or("", |token| token.value.as_str())
    }
}
