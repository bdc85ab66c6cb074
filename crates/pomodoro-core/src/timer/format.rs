//! `MM:SS` rendering and parsing for the editable countdown field.
//!
//! Parsing is deliberately lossy: any input that is not exactly two
//! non-negative integer fields separated by `:` becomes zero seconds.

/// Render seconds as `MM:SS`. Minutes are not clamped to 59.
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Parse `MM:SS` into seconds. Malformed input yields 0.
pub fn parse_time(input: &str) -> u64 {
    try_parse_time(input).unwrap_or(0)
}

fn try_parse_time(input: &str) -> Option<u64> {
    let (minutes, seconds) = input.trim().split_once(':')?;
    if seconds.contains(':') {
        return None;
    }
    let minutes = parse_field(minutes)?;
    let seconds = parse_field(seconds)?;
    minutes.checked_mul(60)?.checked_add(seconds)
}

// `u64::from_str` accepts a leading '+', the field must be digits only.
fn parse_field(field: &str) -> Option<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
