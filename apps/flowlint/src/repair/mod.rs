//! Remote repair: completion client, prompts, response cleanup, and the
//! backup-then-write file update.

pub mod backup;
pub mod client;
pub mod prompt;
pub mod sanitize;

pub use backup::{backup_path, write_with_backup};
pub use client::HttpCompleter;
pub use sanitize::clean_response;

/// Text-completion service used to propose fixes.
///
/// Implementations never fail: an empty string means no usable completion.
pub trait Completer {
    fn complete(&self, prompt: &str, max_tokens: u32, temperature: f32) -> String;
}

/// Whether a failed file may be sent for repair.
///
/// A repaired file is re-checked with `Disabled`, so repair runs at most
/// once per `validate_file` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairMode {
    Enabled,
    Disabled,
}

impl From<bool> for RepairMode {
    fn from(auto_fix: bool) -> Self {
        if auto_fix {
            RepairMode::Enabled
        } else {
            RepairMode::Disabled
        }
    }
}

/// Completer for runs without repair; always answers with nothing.
pub struct NoopCompleter;

impl Completer for NoopCompleter {
    fn complete(&self, _prompt: &str, _max_tokens: u32, _temperature: f32) -> String {
        String::new()
    }
}
