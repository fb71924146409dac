//! Source context snippets
//!
//! Renders the failure line with three lines of context above and below,
//! clipped to the bounds of the file. Any I/O problem makes the snippet
//! silently absent; a report is never aborted over a missing source file.

use std::path::Path;

/// Number of context lines above and below the failure line.
const CONTEXT_LINES: u32 = 3;

/// Width of the horizontal rule framing a snippet.
const RULE_WIDTH: usize = 79;

/// Renders the source window around `line` in `path`.
///
/// Returns `None` when the file cannot be read or the line is out of range.
pub fn source_snippet(path: &Path, line: u32) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let lines: Vec<&str> = content.lines().collect();
    let total = lines.len() as u32;
    if line == 0 || line > total {
        return None;
    }

    let first = line.saturating_sub(CONTEXT_LINES).max(1);
    let last = (line + CONTEXT_LINES).min(total);

    let mut out = String::new();
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    for number in first..=last {
        let code_line = lines[(number - 1) as usize].trim_end();
        if number == line {
            out.push_str(&format!("----> {:4} {}\n", number, code_line));
        } else {
            out.push_str(&format!("      {:4} {}\n", number, code_line));
        }
    }
    out.push_str(&"-".repeat(RULE_WIDTH));
    Some(out)
}
