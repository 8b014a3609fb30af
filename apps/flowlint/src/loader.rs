//! Document loading: read a workflow file and parse it into a mapping.
//!
//! Failures come back as `LintError` values; the validator turns them into
//! issues so nothing is raised past it.

use crate::error::LintError;
use crate::models::workflow::Document;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Read the raw text of a workflow file.
pub fn read_source(path: &Path) -> Result<String, LintError> {
    fs::read_to_string(path).map_err(|source| LintError::FileIo {
        path: path.to_string_lossy().to_string(),
        source,
    })
}

/// Parse workflow text into a `Document`.
///
/// With `yaml11_booleans`, unquoted top-level keys spelled as YAML 1.1
/// booleans (`on`, `yes`, `off`, ...) are coerced to boolean keys, the way a
/// YAML 1.1 parser would load them.
pub fn parse_document(path: &str, content: &str, yaml11_booleans: bool) -> Result<Document, LintError> {
    let value: Value = serde_yaml::from_str(content).map_err(|source| LintError::Parse {
        path: path.to_string(),
        source,
    })?;
    let root = match value {
        Value::Mapping(m) => m,
        _ => {
            return Err(LintError::NotAMapping {
                path: path.to_string(),
            })
        }
    };
    if !yaml11_booleans {
        return Ok(Document::new(root));
    }
    let coerced = yaml11_boolean_keys(content);
    if coerced.is_empty() {
        return Ok(Document::new(root));
    }
    let mut out = Mapping::with_capacity(root.len());
    for (k, v) in root {
        let replaced = match &k {
            Value::String(s) => coerced
                .iter()
                .find(|(word, _)| word == s)
                .map(|(_, b)| Value::Bool(*b)),
            _ => None,
        };
        out.insert(replaced.unwrap_or(k), v);
    }
    Ok(Document::new(out))
}

fn yaml11_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?m)^(yes|Yes|YES|no|No|NO|on|On|ON|off|Off|OFF|true|True|TRUE|false|False|FALSE)[ \t]*:(?:[ \t]|$)",
        )
        .expect("static regex")
    })
}

/// Unquoted top-level keys that YAML 1.1 reads as booleans, with their value.
fn yaml11_boolean_keys(content: &str) -> Vec<(String, bool)> {
    let mut found: Vec<(String, bool)> = Vec::new();
    for cap in yaml11_key_regex().captures_iter(content) {
        let word = cap[1].to_string();
        let truthy = matches!(
            word.to_ascii_lowercase().as_str(),
            "yes" | "on" | "true"
        );
        if !found.iter().any(|(w, _)| *w == word) {
            found.push((word, truthy));
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_mapping_keeps_on_as_string() {
        let doc = parse_document("ci.yml", "name: ci\non: push\njobs: {}\n", false).unwrap();
        assert!(doc.has_key("on"));
        assert!(doc.boolean_keys().is_empty());
    }

    #[test]
    fn test_parse_error_mentions_path() {
        let err = parse_document("bad.yml", "name: [unclosed\n", false).unwrap_err();
        assert!(matches!(err, LintError::Parse { .. }));
        assert!(err.to_string().starts_with("parse error in bad.yml: "));
    }

    #[test]
    fn test_non_mapping_top_level_is_rejected() {
        let err = parse_document("list.yml", "- a\n- b\n", false).unwrap_err();
        assert!(matches!(err, LintError::NotAMapping { .. }));
        assert!(parse_document("empty.yml", "", false).is_err());
    }

    #[test]
    fn test_yaml11_coercion_turns_on_into_boolean_key() {
        let src = "name: ci\non:\n  push: {}\njobs: {}\n";
        let doc = parse_document("ci.yml", src, true).unwrap();
        assert!(!doc.has_key("on"));
        assert_eq!(doc.boolean_keys(), vec![true]);
        // quoted keys and nested keys are left alone
        let src = "name: ci\n\"on\": push\njobs:\n  off: {}\n";
        let doc = parse_document("ci.yml", src, true).unwrap();
        assert!(doc.has_key("on"));
        assert!(doc.boolean_keys().is_empty());
    }

    #[test]
    fn test_yaml11_coercion_skips_single_letter_keys() {
        let src = "name: ci\ny: 1\nN: 2\nNo: 3\njobs: {}\n";
        let doc = parse_document("ci.yml", src, true).unwrap();
        assert!(doc.has_key("y"));
        assert!(doc.has_key("N"));
        assert_eq!(doc.boolean_keys(), vec![false]);
    }

    #[test]
    fn test_read_source_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_source(&dir.path().join("nope.yml")).unwrap_err();
        assert!(err.to_string().starts_with("file error in "));
    }
}
