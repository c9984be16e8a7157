//! UI timers: elapsed-usage refresh cadence and calendar rollover detection.

use chrono::{DateTime, Local, NaiveDate, TimeDelta};

/// Cadence at which elapsed-usage displays are refreshed.
pub const REFRESH_INTERVAL: TimeDelta = TimeDelta::seconds(1);

/// Cadence at which the calendar date is compared for bucket rotation.
pub const ROLLOVER_CHECK_INTERVAL: TimeDelta = TimeDelta::minutes(5);

/// Detects a change of the local calendar date, polling at most once per
/// [`ROLLOVER_CHECK_INTERVAL`].
#[derive(Debug, Clone)]
pub struct DayWatch {
    last_date: NaiveDate,
    last_check: DateTime<Local>,
}

impl DayWatch {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            last_date: now.date_naive(),
            last_check: now,
        }
    }

    /// Returns the new date when a rollover is detected.
    pub fn poll(&mut self, now: DateTime<Local>) -> Option<NaiveDate> {
        if now - self.last_check < ROLLOVER_CHECK_INTERVAL {
            return None;
        }
        self.last_check = now;

        let today = now.date_naive();
        if today != self.last_date {
            self.last_date = today;
            Some(today)
        } else {
            None
        }
    }
}
