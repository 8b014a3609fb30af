//! flowlint core library.
//!
//! Programmatic APIs for validating CI workflow files, repairing them through
//! a text-completion service, and rendering templates.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing for both binaries.
//! - `config`: Discovery and effective configuration resolution.
//! - `loader`: Reading and parsing workflow files.
//! - `checks`: Structure checks (required keys, boolean keys, jobs).
//! - `lint`: The `Validator` driving load, check and repair per file.
//! - `repair`: Completion client, prompts, response cleanup, backups.
//! - `models`: Issue, report and workflow document types.
//! - `output`: Console printers and report persistence.
//! - `render`: Template rendering for `flowlint-render`.
//! - `logging`, `utils`, `error`: Supporting pieces.
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod lint;
pub mod loader;
pub mod logging;
pub mod models;
pub mod output;
pub mod render;
pub mod repair;
pub mod utils;
