//! Shared data models for validation results and workflow documents.

pub mod workflow;

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
/// One human-readable violation. The text names the file it concerns.
pub struct Issue(String);

impl Issue {
    pub fn new(text: impl Into<String>) -> Self {
        Issue(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<crate::error::LintError> for Issue {
    fn from(e: crate::error::LintError) -> Self {
        Issue(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
/// Report derived from the validator's issues at the time it is requested.
pub struct ValidationReport {
    pub total_issues: usize,
    pub issues: Vec<Issue>,
    pub status: Status,
}

impl ValidationReport {
    pub fn from_issues(issues: &[Issue]) -> Self {
        ValidationReport {
            total_issues: issues.len(),
            issues: issues.to_vec(),
            status: if issues.is_empty() {
                Status::Passed
            } else {
                Status::Failed
            },
        }
    }

    pub fn passed(&self) -> bool {
        self.status == Status::Passed
    }

    /// Process exit code for this report: 0 when passed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}
