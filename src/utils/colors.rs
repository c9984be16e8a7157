/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

use crate::models::StationStatus;

/// Free → green, occupied → red.
pub fn color_for_status(status: StationStatus) -> &'static str {
    match status {
        StationStatus::Free => GREEN,
        StationStatus::Occupied => RED,
    }
}

/// Grey placeholder for empty cells ("-" or ""), plain text otherwise.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
