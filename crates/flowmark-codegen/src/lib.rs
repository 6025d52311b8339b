//! Flowmark Code Generator
//!
//! Compiles a parsed [`Program`] into a Mermaid flowchart: one rendered
//! line per call expression, plus the fenced markdown document that wraps
//! them.
//!
//! ```text
//! Program AST → compile() → CompilerOutput { lines, document }
//! ```

pub mod flowchart;
pub mod markdown;

pub use flowchart::{generate, render};

use flowmark_parser::Program;

/// The compiled output from a flowmark program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOutput {
    /// Rendered flowchart statements, one per call expression.
    pub lines: Vec<String>,
    /// `lines` wrapped in the mermaid code fence.
    pub document: String,
}

/// Compile a program into flowchart lines and the enveloped document.
pub fn compile(program: &Program) -> CompilerOutput {
    let lines = generate(program);
    let document = markdown::envelope(&lines);

    tracing::debug!(lines = lines.len(), bytes = document.len(), "generated flowchart");

    CompilerOutput { lines, document }
}
