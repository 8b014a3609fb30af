//! Error kinds raised while checking and repairing workflow files.
//!
//! None of these escape the validator: `Display` of each variant is the
//! issue text recorded in the report, except `Remote`, which the completion
//! client logs and turns into an empty response.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LintError {
    #[error("parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("parse error in {path}: top-level document is not a mapping")]
    NotAMapping { path: String },

    #[error("file error in {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("completion request failed: {0}")]
    Remote(String),
}

impl From<reqwest::Error> for LintError {
    fn from(e: reqwest::Error) -> Self {
        LintError::Remote(e.to_string())
    }
}

/// Failures of the template renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid variables JSON: {0}")]
    Variables(#[from] serde_json::Error),

    #[error("variables must be a JSON object")]
    VariablesNotObject,
}
