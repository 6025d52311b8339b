//! Markdown document envelope.
//!
//! Wraps rendered flowchart statements in a fenced `mermaid` block with a
//! left-to-right flowchart header.

/// Flowchart header line. Only left-to-right layouts are produced.
pub const FLOWCHART_HEADER: &str = "flowchart LR";

const FENCE_OPEN: &str = "```mermaid";
const FENCE_CLOSE: &str = "```";

/// Build the full output document. Every line, including the closing
/// fence, ends with `\n`.
pub fn envelope(lines: &[String]) -> String {
    let mut out = String::new();
    for line in [FENCE_OPEN, FLOWCHART_HEADER]
        .into_iter()
        .chain(lines.iter().map(String::as_str))
        .chain([FENCE_CLOSE])
    {
        out.push_str(line);
        out.push('\n');
    }
    out
}
