//! Date-bucketed check-in/check-out log.
//!
//! Each calendar day owns one JSON bucket (`lounge-YYYY-MM-DD.json`). Every
//! event reads the whole bucket, mutates it in memory and rewrites it; a
//! single mutex serializes these cycles so the log can be driven from a
//! worker thread.

use crate::errors::AppResult;
use crate::models::{EventRecord, Occupant};
use crate::store::{read_json, write_json};
use crate::ui::messages::warning;
use crate::utils::date::bucket_key;
use chrono::{DateTime, Local, NaiveDate};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    /// No open check-in matched; the bucket is left as it was.
    NoMatch,
}

#[derive(Debug)]
pub struct EventLog {
    dir: PathBuf,
    lock: Mutex<()>,
    stale: AtomicBool,
}

impl EventLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
            stale: AtomicBool::new(false),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn bucket_path(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("lounge-{}.json", bucket_key(&date)))
    }

    /// Records of one day, for the log view and exports.
    pub fn read_bucket(&self, date: NaiveDate) -> Vec<EventRecord> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load_lenient(&self.bucket_path(date))
    }

    pub fn append_checkin(&self, occupant: &Occupant, station_id: u32) -> AppResult<()> {
        self.append_checkin_on(Local::now().date_naive(), occupant, station_id)
    }

    pub fn append_checkin_on(
        &self,
        date: NaiveDate,
        occupant: &Occupant,
        station_id: u32,
    ) -> AppResult<()> {
        self.with_bucket(date, |entries| {
            entries.push(EventRecord::open(occupant, station_id));
            ((), true)
        })
    }

    pub fn close_checkin(
        &self,
        occupant_id: &str,
        station_id: u32,
        original_checkin: Option<DateTime<Local>>,
    ) -> AppResult<CloseOutcome> {
        self.close_checkin_at(Local::now(), occupant_id, station_id, original_checkin)
    }

    /// Close the most recent open record of `occupant_id` on `station_id`
    /// in the bucket of `now`'s date.
    ///
    /// Only that single bucket is searched: a check-in made before midnight
    /// is not found by a check-out after it.
    pub fn close_checkin_at(
        &self,
        now: DateTime<Local>,
        occupant_id: &str,
        station_id: u32,
        original_checkin: Option<DateTime<Local>>,
    ) -> AppResult<CloseOutcome> {
        self.with_bucket(now.date_naive(), |entries| {
            match entries
                .iter_mut()
                .rev()
                .find(|e| e.matches_open(occupant_id, station_id, original_checkin))
            {
                Some(entry) => {
                    entry.close(now);
                    (CloseOutcome::Closed, true)
                }
                None => (CloseOutcome::NoMatch, false),
            }
        })
    }

    pub fn reassign_station(
        &self,
        occupant_id: &str,
        checkin_time: DateTime<Local>,
        station_id: u32,
    ) -> AppResult<bool> {
        self.reassign_station_on(Local::now().date_naive(), occupant_id, checkin_time, station_id)
    }

    /// Promote the open queued record (station 0) of an occupant to a real station.
    pub fn reassign_station_on(
        &self,
        date: NaiveDate,
        occupant_id: &str,
        checkin_time: DateTime<Local>,
        station_id: u32,
    ) -> AppResult<bool> {
        self.with_bucket(date, |entries| {
            match entries
                .iter_mut()
                .rev()
                .find(|e| e.matches_open(occupant_id, 0, Some(checkin_time)))
            {
                Some(entry) => {
                    entry.station_id = station_id;
                    (true, true)
                }
                None => (false, false),
            }
        })
    }

    /// Consume the "log view is stale" flag raised by every bucket write.
    pub fn take_stale(&self) -> bool {
        self.stale.swap(false, Ordering::AcqRel)
    }

    /// Load, mutate and save one bucket under the lock. `mutate` returns its
    /// result and whether it changed anything; an untouched bucket is not written.
    fn with_bucket<R>(
        &self,
        date: NaiveDate,
        mutate: impl FnOnce(&mut Vec<EventRecord>) -> (R, bool),
    ) -> AppResult<R> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let path = self.bucket_path(date);

        let mut entries = self.load_lenient(&path);
        let (out, changed) = mutate(&mut entries);
        if !changed {
            return Ok(out);
        }
        write_json(&path, &entries)?;

        self.stale.store(true, Ordering::Release);
        Ok(out)
    }

    fn load_lenient(&self, path: &Path) -> Vec<EventRecord> {
        match read_json::<Vec<EventRecord>>(path) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                warning(format!(
                    "Unreadable log bucket {} ({}); treating it as empty.",
                    path.display(),
                    e
                ));
                Vec::new()
            }
        }
    }
}
