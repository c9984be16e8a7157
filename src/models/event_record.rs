use super::occupant::Occupant;
use crate::utils::time::format_usage;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One check-in (and its later check-out) inside a daily bucket.
///
/// Check-in fields never change after creation; only `checkout_time` and
/// `usage_duration` are filled in when the occupant leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub occupant_name: String,
    pub occupant_id: String,
    pub station_id: u32,
    pub checkin_time: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_time: Option<DateTime<Local>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_duration: Option<String>,
}

impl EventRecord {
    pub fn open(occupant: &Occupant, station_id: u32) -> Self {
        Self {
            occupant_name: occupant.name.clone(),
            occupant_id: occupant.id.clone(),
            station_id,
            checkin_time: occupant.checkin_time,
            checkout_time: None,
            usage_duration: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.checkout_time.is_none()
    }

    /// Matching rule used by check-out reconciliation.
    pub fn matches_open(
        &self,
        occupant_id: &str,
        station_id: u32,
        original: Option<DateTime<Local>>,
    ) -> bool {
        self.is_open()
            && self.occupant_id == occupant_id
            && self.station_id == station_id
            && original.is_none_or(|t| self.checkin_time == t)
    }

    pub(crate) fn close(&mut self, at: DateTime<Local>) {
        self.checkout_time = Some(at);
        self.usage_duration = Some(format_usage(at - self.checkin_time));
    }
}
