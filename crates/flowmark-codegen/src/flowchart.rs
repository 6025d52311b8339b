//! Flowchart statement renderer.
//!
//! Maps each call expression to one Mermaid flowchart statement. Node
//! shapes come from the bracket style around the label; relations become
//! labelled arrows. Ids are emitted as written, with no check that a
//! relation's endpoints were declared.

use flowmark_parser::{CallExpr, CallName, Program};

/// Render every expression of a program, in order.
pub fn generate(program: &Program) -> Vec<String> {
    program.expressions.iter().map(render).collect()
}

/// Render a single call expression.
pub fn render(expr: &CallExpr) -> String {
    match expr.name {
        CallName::Entity => node(expr, "[", "]"),
        CallName::Database => node(expr, "[(", ")]"),
        CallName::Queue => node(expr, "[[", "]]"),
        CallName::Decision => node(expr, "{", "}"),
        CallName::Rel => format!("{}-->|{}|{}", expr.param(0), expr.param(1), expr.param(2)),
    }
}

fn node(expr: &CallExpr, open: &str, close: &str) -> String {
    format!("{}{open}{}{close}", expr.param(0), expr.param(1))
}
