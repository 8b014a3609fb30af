//! Workflow document schema: the keys the structure checker relies on.

use serde_yaml::{Mapping, Value};

/// Top-level keys every workflow must declare, in reporting order.
pub const REQUIRED_FIELDS: [&str; 3] = ["name", "on", "jobs"];

/// Key marking a job as a call to a reusable workflow.
pub const REUSABLE_KEY: &str = "uses";

/// Keys an ordinary job must declare.
pub const JOB_REQUIRED_FIELDS: [&str; 2] = ["runs-on", "steps"];

/// A successfully parsed workflow file.
#[derive(Debug, Clone)]
pub struct Document {
    pub root: Mapping,
}

impl Document {
    pub fn new(root: Mapping) -> Self {
        Document { root }
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    /// Top-level keys that are boolean literals instead of strings.
    pub fn boolean_keys(&self) -> Vec<bool> {
        self.root
            .keys()
            .filter_map(|k| match k {
                Value::Bool(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    /// `jobs` as a mapping, when it is one.
    pub fn jobs(&self) -> Option<&Mapping> {
        self.root.get("jobs").and_then(Value::as_mapping)
    }
}

/// Render a mapping key for issue text; non-string keys use their YAML form.
pub fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_keys_and_jobs() {
        let root: Mapping = serde_yaml::from_str("true: 1\nname: x\njobs:\n  a: {}\n").unwrap();
        let doc = Document::new(root);
        assert_eq!(doc.boolean_keys(), vec![true]);
        assert!(doc.has_key("name"));
        assert_eq!(doc.jobs().map(|j| j.len()), Some(1));
    }

    #[test]
    fn test_key_label_forms() {
        assert_eq!(key_label(&Value::String("build".into())), "build");
        assert_eq!(key_label(&Value::Bool(false)), "false");
        assert_eq!(key_label(&Value::Number(3.into())), "3");
    }
}
