use super::station::QUEUE_STATION;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// An occupant currently checked in (⇔ one entry of active_users.json).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occupant {
    pub id: String,
    pub name: String,
    pub checkin_time: DateTime<Local>,
    pub station_id: u32,
}

impl Occupant {
    pub fn new(id: &str, name: &str, station_id: u32, checkin_time: DateTime<Local>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            checkin_time,
            station_id,
        }
    }

    pub fn is_queued(&self) -> bool {
        self.station_id == QUEUE_STATION
    }

    pub fn checkin_str(&self) -> String {
        self.checkin_time.format("%H:%M:%S").to_string()
    }
}
