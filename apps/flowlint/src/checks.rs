//! Structure checks for parsed workflow documents.
//!
//! Every check runs regardless of the others; each violation becomes one
//! issue whose text names the file.

use crate::models::workflow::{key_label, Document, JOB_REQUIRED_FIELDS, REQUIRED_FIELDS, REUSABLE_KEY};
use crate::models::Issue;
use serde_yaml::Value;

/// Run all structure checks against `doc`, returning the issues found.
pub fn run_checks(doc: &Document, path: &str) -> Vec<Issue> {
    let mut out: Vec<Issue> = Vec::new();
    check_required(doc, path, &mut out);
    check_boolean_keys(doc, path, &mut out);
    check_jobs(doc, path, &mut out);
    out
}

/// One issue listing every missing top-level key.
fn check_required(doc: &Document, path: &str, out: &mut Vec<Issue>) {
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|f| !doc.has_key(f))
        .collect();
    if !missing.is_empty() {
        out.push(Issue::new(format!(
            "missing required fields in {}: [{}]",
            path,
            missing.join(", ")
        )));
    }
}

fn check_boolean_keys(doc: &Document, path: &str, out: &mut Vec<Issue>) {
    for key in doc.boolean_keys() {
        out.push(Issue::new(format!(
            "boolean key detected in {}: {} (likely 'on' parsed as a boolean)",
            path, key
        )));
    }
}

fn check_jobs(doc: &Document, path: &str, out: &mut Vec<Issue>) {
    let Some(jobs) = doc.jobs() else {
        return;
    };
    for (name, cfg) in jobs {
        // Non-mapping job bodies are not this check's concern
        let Value::Mapping(cfg) = cfg else {
            continue;
        };
        if cfg.contains_key(REUSABLE_KEY) {
            continue;
        }
        for field in JOB_REQUIRED_FIELDS {
            if !cfg.contains_key(field) {
                out.push(Issue::new(format!(
                    "job '{}' missing '{}' in {}",
                    key_label(name),
                    field,
                    path
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_document;

    fn check(src: &str) -> Vec<Issue> {
        let doc = parse_document("wf.yml", src, false).unwrap();
        run_checks(&doc, "wf.yml")
    }

    #[test]
    fn test_valid_workflow_has_no_issues() {
        let issues = check(
            "name: ci\non: [push]\njobs:\n  build:\n    runs-on: ubuntu-latest\n    steps:\n      - run: echo hi\n",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_missing_fields_reported_once() {
        let issues = check("on: push\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].as_str(),
            "missing required fields in wf.yml: [name, jobs]"
        );
    }

    #[test]
    fn test_reusable_job_skips_runner_checks() {
        let issues = check(
            "name: ci\non: push\njobs:\n  call:\n    uses: org/repo/.github/workflows/x.yml@main\n",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_bare_job_yields_two_issues() {
        let issues = check("name: ci\non: push\njobs:\n  build:\n    env: {}\n");
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].as_str(), "job 'build' missing 'runs-on' in wf.yml");
        assert_eq!(issues[1].as_str(), "job 'build' missing 'steps' in wf.yml");
    }

    #[test]
    fn test_non_mapping_job_is_skipped() {
        let issues = check("name: ci\non: push\njobs:\n  build: just-a-string\n  other: [1, 2]\n");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_boolean_key_detected_alongside_missing_on() {
        let doc = parse_document("wf.yml", "name: ci\non: push\njobs: {}\n", true).unwrap();
        let issues = run_checks(&doc, "wf.yml");
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].as_str(), "missing required fields in wf.yml: [on]");
        assert!(issues[1]
            .as_str()
            .starts_with("boolean key detected in wf.yml: true"));
    }

    #[test]
    fn test_literal_true_key_without_coercion() {
        let issues = check("name: ci\non: push\ntrue: 1\njobs: {}\n");
        assert_eq!(issues.len(), 1);
        assert!(issues[0].as_str().contains("boolean key detected"));
    }
}
