//! Prompt builders for the analysis and fix requests.

use crate::models::Issue;

/// Characters of file content embedded in a fix prompt.
pub const FIX_CONTENT_LIMIT: usize = 1500;
/// Characters of file content embedded in an analysis prompt.
pub const ANALYSIS_CONTENT_LIMIT: usize = 2000;

pub const FIX_MAX_TOKENS: u32 = 800;
pub const ANALYSIS_MAX_TOKENS: u32 = 300;
pub const TEMPERATURE: f32 = 0.1;

/// First `limit` characters of `s`, cut on a char boundary.
pub fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Ask for a corrected workflow addressing `issues`.
pub fn fix_prompt(content: &str, issues: &[Issue]) -> String {
    let issues_text = issues
        .iter()
        .map(|i| format!("- {}", i))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Fix this GitHub Actions workflow YAML. The following issues were detected:\n\n\
         Issues to fix:\n{}\n\n\
         Original YAML:\n```yaml\n{}\n```\n\n\
         Provide the corrected YAML with proper syntax and structure. Focus on:\n\
         1. Quoting 'on' key if it's being parsed as boolean\n\
         2. Ensuring proper indentation\n\
         3. Adding missing required fields\n\
         4. Fixing job structure\n\n\
         Return only the corrected YAML:",
        issues_text,
        truncate_chars(content, FIX_CONTENT_LIMIT)
    )
}

/// Ask for a short diagnosis of a workflow that failed to parse.
pub fn analysis_prompt(path: &str, content: &str) -> String {
    format!(
        "You are a GitHub Actions workflow expert. Analyze this workflow file and identify issues:\n\n\
         File: {}\n\
         Content:\n```yaml\n{}\n```\n\n\
         Common issues to check:\n\
         1. YAML syntax errors\n\
         2. Missing required fields: name, on, jobs\n\
         3. Boolean 'on' key (should be quoted as \"on\")\n\
         4. Missing 'runs-on' in jobs\n\
         5. Missing 'steps' in jobs\n\
         6. Indentation issues\n\
         7. Invalid trigger configurations\n\n\
         Provide a concise analysis and specific fixes needed:",
        path,
        truncate_chars(content, ANALYSIS_CONTENT_LIMIT)
    )
}
