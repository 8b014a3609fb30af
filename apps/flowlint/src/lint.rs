//! Validation runner for workflow files.
//!
//! A `Validator` owns the issue list for one run. Each file goes through
//! load, structure check and, when repair is enabled and the file failed,
//! one repair attempt followed by a single re-check with repair disabled.

use crate::checks::run_checks;
use crate::loader::{parse_document, read_source};
use crate::models::workflow::Document;
use crate::models::{Issue, ValidationReport};
use crate::output;
use crate::repair::prompt::{
    analysis_prompt, fix_prompt, ANALYSIS_MAX_TOKENS, FIX_MAX_TOKENS, TEMPERATURE,
};
use crate::repair::{clean_response, write_with_backup, Completer, RepairMode};
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default file patterns for directory scans.
pub const DEFAULT_PATTERNS: [&str; 2] = ["*.yml", "*.yaml"];

/// Outcome of loading one file.
pub enum Loaded {
    Unreadable,
    Malformed { content: String },
    Parsed { content: String, document: Document },
}

enum Pass {
    Valid,
    Invalid,
    Repaired,
}

pub struct Validator<'a> {
    completer: &'a dyn Completer,
    yaml11_booleans: bool,
    issues: Vec<Issue>,
}

impl<'a> Validator<'a> {
    pub fn new(completer: &'a dyn Completer, yaml11_booleans: bool) -> Self {
        Validator {
            completer,
            yaml11_booleans,
            issues: Vec::new(),
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Snapshot of the issues collected so far.
    pub fn report(&self) -> ValidationReport {
        ValidationReport::from_issues(&self.issues)
    }

    fn record(&mut self, issue: Issue) {
        output::print_issue(&issue);
        self.issues.push(issue);
    }

    /// Read and parse `path`, recording a file or parse issue on failure.
    pub fn load_document(&mut self, path: &Path) -> Loaded {
        let content = match read_source(path) {
            Ok(s) => s,
            Err(e) => {
                self.record(e.into());
                return Loaded::Unreadable;
            }
        };
        let label = path.to_string_lossy();
        match parse_document(&label, &content, self.yaml11_booleans) {
            Ok(document) => Loaded::Parsed { content, document },
            Err(e) => {
                self.record(e.into());
                Loaded::Malformed { content }
            }
        }
    }

    /// Check a parsed document; true when no issue was added.
    pub fn check_structure(&mut self, doc: &Document, path: &str) -> bool {
        let found = run_checks(doc, path);
        let valid = found.is_empty();
        for issue in found {
            self.record(issue);
        }
        valid
    }

    /// Validate one file, repairing it at most once when `mode` allows.
    pub fn validate_file(&mut self, path: &Path, mode: RepairMode) -> bool {
        let mut mode = mode;
        loop {
            match self.check_pass(path, mode) {
                Pass::Valid => return true,
                Pass::Invalid => return false,
                Pass::Repaired => {
                    debug!(path = %path.display(), "re-checking repaired file");
                    mode = RepairMode::Disabled;
                }
            }
        }
    }

    fn check_pass(&mut self, path: &Path, mode: RepairMode) -> Pass {
        output::print_validating(path);
        let since = self.issues.len();
        match self.load_document(path) {
            Loaded::Unreadable => Pass::Invalid,
            Loaded::Malformed { content } => {
                if mode == RepairMode::Enabled && self.attempt_repair(path, &content, since, true) {
                    Pass::Repaired
                } else {
                    Pass::Invalid
                }
            }
            Loaded::Parsed { content, document } => {
                let label = path.to_string_lossy().to_string();
                if self.check_structure(&document, &label) {
                    output::print_valid(path);
                    Pass::Valid
                } else if mode == RepairMode::Enabled
                    && self.attempt_repair(path, &content, since, false)
                {
                    Pass::Repaired
                } else {
                    Pass::Invalid
                }
            }
        }
    }

    /// Ask the completer for a fix covering the issues recorded since
    /// `since`, and write it over the file. True when a fix was written.
    fn attempt_repair(&mut self, path: &Path, content: &str, since: usize, analyze: bool) -> bool {
        let label = path.to_string_lossy().to_string();
        let issues = self.issues[since..].to_vec();
        info!(path = %label, issues = issues.len(), "requesting repair");
        if analyze {
            output::print_repairing(true);
            let analysis = self.completer.complete(
                &analysis_prompt(&label, content),
                ANALYSIS_MAX_TOKENS,
                TEMPERATURE,
            );
            if !analysis.is_empty() {
                output::print_analysis(&analysis);
            }
        } else {
            output::print_repairing(false);
        }
        let raw = self
            .completer
            .complete(&fix_prompt(content, &issues), FIX_MAX_TOKENS, TEMPERATURE);
        let fixed = clean_response(&raw);
        if fixed.is_empty() {
            warn!(path = %label, "no usable fix returned");
            return false;
        }
        match write_with_backup(path, &fixed) {
            Ok(backup) => {
                output::print_fixed(path, &backup);
                true
            }
            Err(e) => {
                self.record(e.into());
                false
            }
        }
    }

    /// Validate every file in `dir` matching `patterns` (non-recursive).
    ///
    /// A directory without matches is a success.
    pub fn validate_directory(&mut self, dir: &Path, patterns: &[String], mode: RepairMode) -> bool {
        let files = collect_targets(dir, patterns);
        if files.is_empty() {
            output::print_no_files(dir);
            return true;
        }
        output::print_found(files.len());
        let mut all_valid = true;
        for file in files {
            if !self.validate_file(&file, mode) {
                all_valid = false;
            }
        }
        all_valid
    }

    /// Validate a file or a directory. `None` when `path` is neither.
    pub fn validate_path(&mut self, path: &Path, patterns: &[String], mode: RepairMode) -> Option<bool> {
        if path.is_file() {
            Some(self.validate_file(path, mode))
        } else if path.is_dir() {
            Some(self.validate_directory(path, patterns, mode))
        } else {
            None
        }
    }
}

/// Files in `dir` matching each pattern in turn, each group in glob order.
///
/// `dir` is matched literally; only `patterns` carry glob syntax.
fn collect_targets(dir: &Path, patterns: &[String]) -> Vec<PathBuf> {
    let base = Pattern::escape(&dir.to_string_lossy());
    let mut targets: Vec<PathBuf> = Vec::new();
    for pat in patterns {
        let pattern = Path::new(&base).join(pat).to_string_lossy().to_string();
        let entries = match glob(&pattern) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(pattern = %pat, "bad glob pattern: {}", e);
                continue;
            }
        };
        for p in entries.flatten() {
            if p.is_file() && !targets.contains(&p) {
                targets.push(p);
            }
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use crate::repair::{backup_path, NoopCompleter};
    use std::cell::RefCell;
    use std::fs;
    use tempfile::tempdir;

    const VALID: &str = "name: ci\non: push\njobs:\n  build:\n    runs-on: ubuntu-latest\n    steps:\n      - run: echo ok\n";

    struct StubCompleter {
        reply: String,
        prompts: RefCell<Vec<(String, u32)>>,
    }

    impl StubCompleter {
        fn new(reply: &str) -> Self {
            StubCompleter {
                reply: reply.to_string(),
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl Completer for StubCompleter {
        fn complete(&self, prompt: &str, max_tokens: u32, _temperature: f32) -> String {
            self.prompts.borrow_mut().push((prompt.to_string(), max_tokens));
            self.reply.clone()
        }
    }

    fn default_patterns() -> Vec<String> {
        DEFAULT_PATTERNS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_directory_passes() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "not a workflow").unwrap();
        let noop = NoopCompleter;
        let mut v = Validator::new(&noop, false);
        assert!(v.validate_directory(dir.path(), &default_patterns(), RepairMode::Disabled));
        let report = v.report();
        assert_eq!(report.total_issues, 0);
        assert_eq!(report.status, Status::Passed);
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_missing_jobs_fails_without_repair() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("ci.yml"), "name: ci\non: push\n").unwrap();
        let noop = NoopCompleter;
        let mut v = Validator::new(&noop, false);
        assert!(!v.validate_directory(dir.path(), &default_patterns(), RepairMode::Disabled));
        let report = v.report();
        assert_eq!(report.exit_code(), 1);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_issues"], 1);
        assert_eq!(json["status"], "failed");
        assert!(json["issues"][0]
            .as_str()
            .unwrap()
            .contains("missing required fields"));
    }

    #[test]
    fn test_directory_scans_yml_then_yaml() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.yml"), VALID).unwrap();
        fs::write(dir.path().join("a.yaml"), VALID).unwrap();
        fs::write(dir.path().join("c.yml"), VALID).unwrap();
        let files = collect_targets(dir.path(), &default_patterns());
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["b.yml", "c.yml", "a.yaml"]);
    }

    #[test]
    fn test_directory_name_with_glob_metacharacters() {
        let root = tempdir().unwrap();
        let dir = root.path().join("wf[1]");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("ci.yml"), "name: ci\non: push\n").unwrap();
        let noop = NoopCompleter;
        let mut v = Validator::new(&noop, false);
        assert!(!v.validate_directory(&dir, &["*.yml".to_string()], RepairMode::Disabled));
        assert_eq!(v.report().total_issues, 1);
    }

    #[test]
    fn test_unreadable_file_records_file_error() {
        let dir = tempdir().unwrap();
        let noop = NoopCompleter;
        let mut v = Validator::new(&noop, false);
        assert!(!v.validate_file(&dir.path().join("gone.yml"), RepairMode::Disabled));
        assert_eq!(v.issues().len(), 1);
        assert!(v.issues()[0].as_str().starts_with("file error in "));
    }

    #[test]
    fn test_validate_path_missing_is_none() {
        let dir = tempdir().unwrap();
        let noop = NoopCompleter;
        let mut v = Validator::new(&noop, false);
        let res = v.validate_path(&dir.path().join("nope"), &default_patterns(), RepairMode::Disabled);
        assert!(res.is_none());
    }

    #[test]
    fn test_structure_repair_writes_backup_and_rechecks() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("ci.yml");
        fs::write(&p, "name: ci\non: push\njobs:\n  build:\n    env: {}\n").unwrap();
        let stub = StubCompleter::new(&format!("Sure:\n```yaml\n{}```\n", VALID));
        let mut v = Validator::new(&stub, false);

        assert!(v.validate_file(&p, RepairMode::Enabled));
        assert_eq!(fs::read_to_string(&p).unwrap(), VALID.trim());
        assert!(fs::read_to_string(backup_path(&p)).unwrap().contains("env: {}"));

        let prompts = stub.prompts.borrow();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].1, FIX_MAX_TOKENS);
        assert!(prompts[0].0.contains("job 'build' missing 'runs-on'"));
        assert!(prompts[0].0.contains("job 'build' missing 'steps'"));
        // issues from the failed pass are kept
        assert_eq!(v.report().total_issues, 2);
    }

    #[test]
    fn test_parse_failure_requests_analysis_then_fix() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("ci.yml");
        fs::write(&p, "name: [broken\n").unwrap();
        let stub = StubCompleter::new(VALID);
        let mut v = Validator::new(&stub, false);

        assert!(v.validate_file(&p, RepairMode::Enabled));
        let prompts = stub.prompts.borrow();
        assert_eq!(prompts.len(), 2);
        assert_eq!(prompts[0].1, ANALYSIS_MAX_TOKENS);
        assert_eq!(prompts[1].1, FIX_MAX_TOKENS);
        assert!(prompts[1].0.contains("- parse error in "));
        assert_eq!(v.issues().len(), 1);
    }

    #[test]
    fn test_repair_runs_only_once() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("ci.yml");
        fs::write(&p, "name: ci\n").unwrap();
        // The "fix" is still missing `on` and `jobs`
        let stub = StubCompleter::new("```yaml\nname: still-broken\n```");
        let mut v = Validator::new(&stub, false);

        assert!(!v.validate_file(&p, RepairMode::Enabled));
        assert_eq!(stub.prompts.borrow().len(), 1);
        assert_eq!(fs::read_to_string(&p).unwrap(), "name: still-broken");
        assert_eq!(fs::read_to_string(backup_path(&p)).unwrap(), "name: ci\n");
        assert_eq!(v.report().total_issues, 2);
    }

    #[test]
    fn test_second_repair_keeps_first_backup() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("ci.yml");
        fs::write(&p, "name: one\n").unwrap();
        let stub = StubCompleter::new("name: two");
        let mut v = Validator::new(&stub, false);

        assert!(!v.validate_file(&p, RepairMode::Enabled));
        assert!(!v.validate_file(&p, RepairMode::Enabled));
        assert_eq!(fs::read_to_string(backup_path(&p)).unwrap(), "name: one\n");
    }

    #[test]
    fn test_empty_completion_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("ci.yml");
        fs::write(&p, "name: ci\n").unwrap();
        let noop = NoopCompleter;
        let mut v = Validator::new(&noop, false);

        assert!(!v.validate_file(&p, RepairMode::Enabled));
        assert_eq!(fs::read_to_string(&p).unwrap(), "name: ci\n");
        assert!(!backup_path(&p).exists());
    }

    #[test]
    fn test_issues_accumulate_across_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.yml"), "on: push\n").unwrap();
        fs::write(dir.path().join("b.yml"), VALID).unwrap();
        fs::write(dir.path().join("c.yml"), "name: x\non: push\njobs:\n  j: {}\n").unwrap();
        let noop = NoopCompleter;
        let mut v = Validator::new(&noop, false);
        assert!(!v.validate_directory(dir.path(), &default_patterns(), RepairMode::Disabled));
        assert_eq!(v.report().total_issues, 3);
    }
}
