// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// Parse `--range` into an inclusive day interval.
///
/// Accepted forms:
/// - YYYY-MM-DD
/// - YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
/// - YYYY-MM:YYYY-MM
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let (start, end) = match r.split_once(':') {
        Some((s, e)) => (bounds(s.trim())?.0, bounds(e.trim())?.1),
        None => bounds(r.trim())?,
    };

    if start > end {
        return Err(AppError::InvalidDate(format!(
            "range start {start} is after its end {end}"
        )));
    }
    Ok((start, end))
}

fn bounds(s: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok((d, d));
    }

    let first = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(s.to_string()))?;
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_month
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))?;
    Ok((first, last))
}

/// Every day of the inclusive interval.
pub(crate) fn days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}
