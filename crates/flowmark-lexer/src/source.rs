//! Line splitting for flowmark documents.

/// One physical line of a source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub text: String,
    /// 1-based.
    pub line_number: usize,
}

impl SourceLine {
    pub fn new(text: impl Into<String>, line_number: usize) -> Self {
        Self {
            text: text.into(),
            line_number,
        }
    }
}

/// Split a document into numbered lines.
///
/// Accepts both `\n` and `\r\n` line endings. A final newline does not
/// produce a trailing empty line.
pub fn source_lines(source: &str) -> Vec<SourceLine> {
    source
        .lines()
        .enumerate()
        .map(|(index, text)| SourceLine::new(text, index + 1))
        .collect()
}
