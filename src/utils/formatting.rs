//! Formatting utilities used for CLI outputs.

use crate::models::status::Status;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static ANSI: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok());

/// Remove ANSI colour and erase-line sequences.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    match ANSI.as_ref() {
        Some(re) => re.replace_all(s, ""),
        None => Cow::Borrowed(s),
    }
}

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// `round(part / total * 100, 2)` with exact halves going to the even
/// digit (3.125 -> 3.12), or 0 when `total` is zero.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = part as f64 / total as f64 * 100.0;
    (raw * 100.0).round_ties_even() / 100.0
}

/// Label and ANSI colour for an attendance status.
pub fn describe_status(status: Status) -> (&'static str, &'static str) {
    match status {
        Status::Present => ("Present", "\x1b[32m"),
        Status::Absent => ("Absent", "\x1b[31m"),
    }
}
