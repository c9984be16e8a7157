//! Time utilities: usage durations and elapsed-time formatting.

use chrono::{DateTime, Local, TimeDelta};

/// Compact usage text: `1h05m09s`, `5m09s`, `9s`.
///
/// The duration is rounded to whole seconds; negative spans (clock skew)
/// collapse to `0s`.
pub fn format_usage(d: TimeDelta) -> String {
    let millis = d.num_milliseconds().max(0);
    let total = (millis + 500) / 1000;
    let h = total / 3600;
    let m = (total / 60) % 60;
    let s = total % 60;

    if h > 0 {
        format!("{}h{:02}m{:02}s", h, m, s)
    } else if m > 0 {
        format!("{}m{:02}s", m, s)
    } else {
        format!("{}s", s)
    }
}

/// Elapsed usage from `start` up to `now`, formatted like [`format_usage`].
pub fn elapsed_since(start: DateTime<Local>, now: DateTime<Local>) -> String {
    format_usage(now - start)
}

pub fn format_clock(t: &DateTime<Local>) -> String {
    t.format("%H:%M:%S").to_string()
}

/// Clock time plus day, as shown in the log view: `15:04:05 (Jan 02)`.
pub fn format_clock_with_day(t: &DateTime<Local>) -> String {
    t.format("%H:%M:%S (%b %d)").to_string()
}
