/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Returns GREY for placeholder values ("", "N/A", "Not graded", ...)
/// and RESET otherwise.
pub fn color_for_optional_field(value: &str) -> &'static str {
    match value.trim() {
        "" | "N/A" | "Not graded" | "Not submitted" => GREY,
        _ => RESET,
    }
}

/// Attendance percentage colour:
/// \>= 75 → green
/// \>= 50 → yellow
/// otherwise red
pub fn color_for_percentage(value: f64) -> &'static str {
    if value >= 75.0 {
        GREEN
    } else if value >= 50.0 {
        YELLOW
    } else {
        RED
    }
}

pub fn colorize_status(code: &str) -> String {
    match code {
        "P" => format!("{GREEN}{code}{RESET}"),
        "A" => format!("{RED}{code}{RESET}"),
        other => format!("{GREY}{other}{RESET}"),
    }
}
