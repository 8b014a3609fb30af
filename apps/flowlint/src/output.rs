//! Console rendering for validation progress and the final report, plus
//! persisting the report as JSON.

use crate::models::{Issue, ValidationReport};
use crate::utils::{error_prefix, info_prefix, note_prefix, ok_prefix, use_colors};
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;
use std::fs;
use std::io;
use std::path::Path;

pub fn print_validating(path: &Path) {
    let file = path.to_string_lossy().to_string();
    if use_colors() {
        println!("{} {}", "🔍 validating:".cyan().bold(), file.bold());
    } else {
        println!("🔍 validating: {}", file);
    }
}

/// Print an issue as soon as it is recorded.
pub fn print_issue(issue: &Issue) {
    println!("  {} {}", error_prefix(), issue);
}

pub fn print_valid(path: &Path) {
    println!("{} {} is valid", ok_prefix(), path.to_string_lossy());
}

pub fn print_found(count: usize) {
    println!("{} Found {} workflow files", info_prefix(), count);
}

pub fn print_no_files(dir: &Path) {
    println!(
        "{} No workflow files found in {}",
        note_prefix(),
        dir.to_string_lossy()
    );
}

pub fn print_repairing(syntax: bool) {
    let what = if syntax { "syntax" } else { "structural" };
    println!(
        "{} Requesting an automatic fix for {} issues...",
        info_prefix(),
        what
    );
}

pub fn print_analysis(text: &str) {
    if use_colors() {
        println!("{}\n{}", "📋 analysis:".magenta().bold(), text);
    } else {
        println!("📋 analysis:\n{}", text);
    }
}

pub fn print_fixed(path: &Path, backup: &Path) {
    println!(
        "{} Fixed workflow saved: {} (backup: {})",
        ok_prefix(),
        path.to_string_lossy(),
        backup.to_string_lossy()
    );
}

/// Print the end-of-run summary: every issue, or a pass line.
pub fn print_summary(report: &ValidationReport) {
    let color = use_colors();
    if report.passed() {
        let line = "All validations passed!";
        if color {
            println!("\n{} {}", ok_prefix(), line.green().bold());
        } else {
            println!("\n{} {}", ok_prefix(), line);
        }
        return;
    }
    let head = format!("Validation failed with {} issues:", report.total_issues);
    if color {
        println!("\n{} {}", error_prefix(), head.bold());
    } else {
        println!("\n{} {}", error_prefix(), head);
    }
    for issue in &report.issues {
        println!("  • {}", issue);
    }
}

/// Compose the report JSON (pure) for persistence and tests.
pub fn compose_report_json(report: &ValidationReport) -> JsonVal {
    serde_json::json!({
        "total_issues": report.total_issues,
        "issues": report.issues,
        "status": report.status,
    })
}

/// Write the report to `path` as pretty-printed JSON.
pub fn write_report(path: &Path, report: &ValidationReport) -> io::Result<()> {
    let body = serde_json::to_string_pretty(&compose_report_json(report))?;
    fs::write(path, body)
}
