//! Recover a YAML body from a completion that may wrap it in code fences.

const FENCE: &str = "```";

fn is_fence(line: &str) -> bool {
    line.trim().starts_with(FENCE)
}

/// Extract the document body from a completion.
///
/// The body starts after the first fence line (top-down) and ends before the
/// last fence line (bottom-up). Without fences the whole text is kept. This
/// is a heuristic; nested fences are not understood.
pub fn clean_response(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let lines: Vec<&str> = raw.trim().split('\n').collect();
    let start = lines
        .iter()
        .position(|l| is_fence(l))
        .map(|i| i + 1)
        .unwrap_or(0);
    let end = lines.iter().rposition(|l| is_fence(l)).unwrap_or(lines.len());
    if start >= end {
        return String::new();
    }
    lines[start..end].join("\n").trim().to_string()
}
