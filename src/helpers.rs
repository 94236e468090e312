use chrono::{DateTime, Utc};
use colored::Colorize;
use core::fmt;
use once_cell::sync::Lazy;

pub static SUCCESS: Lazy<colored::ColoredString> = Lazy::new(|| "[MINDER]".green());
pub static FAIL: Lazy<colored::ColoredString> = Lazy::new(|| "[MINDER]".red());
pub static WARN: Lazy<colored::ColoredString> = Lazy::new(|| "[MINDER]".yellow());
pub static INFO: Lazy<colored::ColoredString> = Lazy::new(|| "[MINDER]".cyan());

// Time constants for duration formatting
const SECONDS_IN_YEAR: i64 = 365 * 24 * 60 * 60;
const SECONDS_IN_DAY: i64 = 24 * 60 * 60;
const SECONDS_IN_HOUR: i64 = 60 * 60;
const SECONDS_IN_MINUTE: i64 = 60;

#[derive(Clone, Debug)]
pub struct ColoredString(pub colored::ColoredString);

impl From<colored::ColoredString> for ColoredString {
    fn from(cs: colored::ColoredString) -> Self {
        ColoredString(cs)
    }
}

impl fmt::Display for ColoredString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn format_duration(datetime: DateTime<Utc>) -> String {
    let current_time = Utc::now();
    let duration = current_time.signed_duration_since(datetime);

    match duration.num_seconds() {
        s if s >= SECONDS_IN_YEAR => format!("{}y", s / SECONDS_IN_YEAR),
        s if s >= SECONDS_IN_DAY => format!("{}d", s / SECONDS_IN_DAY),
        s if s >= SECONDS_IN_HOUR => format!("{}h", s / SECONDS_IN_HOUR),
        s if s >= SECONDS_IN_MINUTE => format!("{}m", s / SECONDS_IN_MINUTE),
        s => format!("{}s", s),
    }
}

/// Derive a process name from a script path: basename, extension stripped,
/// non-alphanumeric runs collapsed to `-`.
pub fn name_from_script(script: &str) -> String {
    let base = script.rsplit(['/', '\\']).next().unwrap_or(script);
    let stem = match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    };

    let mut name = String::with_capacity(stem.len());
    let mut last_dash = true;
    for ch in stem.chars() {
        if ch.is_ascii_alphanumeric() {
            name.push(ch);
            last_dash = false;
        } else if !last_dash {
            name.push('-');
            last_dash = true;
        }
    }

    let name = name.trim_end_matches('-').to_string();
    if name.is_empty() {
        "app".to_string()
    } else {
        name
    }
}
