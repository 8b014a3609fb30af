//! Configuration discovery and effective settings resolution.
//!
//! flowlint reads `flowlint.toml|yaml|yml` from the working directory (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `api_url`: `http://localhost:8000`
//! - `api_key_env`: `FLOWLINT_API_KEY` (then `REDHAT_AI_API_KEY`)
//! - `model`: `granite-8b-code-instruct-128k`
//! - `timeout_secs`: 30
//! - `insecure`, `auto_fix`, `yaml11_booleans`: false
//! - `patterns`: `["*.yml", "*.yaml"]`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::cli::Cli;
use crate::lint::DEFAULT_PATTERNS;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_KEY_ENV: &str = "FLOWLINT_API_KEY";
/// Older key variable, still read when the configured one is unset.
pub const LEGACY_API_KEY_ENV: &str = "REDHAT_AI_API_KEY";
pub const DEFAULT_MODEL: &str = "granite-8b-code-instruct-128k";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_NAMES: [&str; 3] = ["flowlint.toml", "flowlint.yaml", "flowlint.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `flowlint.toml|yaml`.
pub struct FlowlintConfig {
    pub api_url: Option<String>,
    pub api_key_env: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub insecure: Option<bool>,
    pub auto_fix: Option<bool>,
    pub yaml11_booleans: Option<bool>,
    #[serde(default)]
    pub patterns: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the validator after applying precedence.
pub struct Effective {
    pub path: PathBuf,
    pub auto_fix: bool,
    pub api_url: String,
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub model: String,
    pub timeout: Duration,
    pub insecure: bool,
    pub yaml11_booleans: bool,
    pub patterns: Vec<String>,
    pub output: Option<PathBuf>,
    /// Whether a config file was found and parsed.
    pub config_found: bool,
}

/// Walk upward from `start` to the directory holding the config.
///
/// Stops when a `flowlint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_config_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `FlowlintConfig` from `flowlint.toml` or `flowlint.yaml|yml` if present.
///
/// An unreadable or malformed file is treated as absent.
pub fn load_config(root: &Path) -> Option<FlowlintConfig> {
    let toml_path = root.join("flowlint.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: FlowlintConfig = toml::from_str(&s).ok()?;
        debug!(path = %toml_path.display(), "loaded config");
        return Some(cfg);
    }
    for yml in ["flowlint.yaml", "flowlint.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: FlowlintConfig = serde_yaml::from_str(&s).ok()?;
            debug!(path = %p.display(), "loaded config");
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` from CLI flags, the config discovered from
/// `config_start`, and defaults. `env_key` looks up the API key variable.
pub fn resolve_effective(
    cli: &Cli,
    config_start: &Path,
    env_key: impl Fn(&str) -> Option<String>,
) -> Effective {
    let root = detect_config_root(config_start);
    let loaded = load_config(&root);
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let api_key_env = cfg
        .api_key_env
        .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string());
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| env_key(&api_key_env).filter(|k| !k.is_empty()))
        .or_else(|| env_key(LEGACY_API_KEY_ENV))
        .filter(|k| !k.is_empty());

    let api_url = cli
        .api_url
        .clone()
        .or(cfg.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let model = cli
        .model
        .clone()
        .or(cfg.model)
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let timeout_secs = cli
        .timeout
        .or(cfg.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    // Boolean flags can only switch a setting on from the CLI
    let auto_fix = cli.auto_fix || cfg.auto_fix.unwrap_or(false);
    let insecure = cli.insecure || cfg.insecure.unwrap_or(false);
    let yaml11_booleans = cli.yaml11_booleans || cfg.yaml11_booleans.unwrap_or(false);

    let patterns = cfg
        .patterns
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PATTERNS.iter().map(|s| s.to_string()).collect());

    Effective {
        path: PathBuf::from(&cli.path),
        auto_fix,
        api_url,
        api_key,
        api_key_env,
        model,
        timeout: Duration::from_secs(timeout_secs),
        insecure,
        yaml11_booleans,
        patterns,
        output: cli.output.as_ref().map(PathBuf::from),
        config_found,
    }
}
