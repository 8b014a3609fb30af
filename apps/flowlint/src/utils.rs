//! Console prefixes shared by the binaries. Colors honor `NO_COLOR`.

use owo_colors::OwoColorize;

pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint(label: &str, style: fn(&str) -> String) -> String {
    if use_colors() {
        style(label)
    } else {
        label.to_string()
    }
}

pub fn error_prefix() -> String {
    paint("✖ error:", |s| s.red().bold().to_string())
}

pub fn note_prefix() -> String {
    paint("◆ note:", |s| s.bright_black().bold().to_string())
}

pub fn info_prefix() -> String {
    paint("◆ info:", |s| s.blue().bold().to_string())
}

pub fn ok_prefix() -> String {
    paint("✔", |s| s.green().bold().to_string())
}
