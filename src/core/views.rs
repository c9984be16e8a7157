//! Typed row view-models handed to the presentation layer.
//!
//! Each field has its own binding function so a renderer never depends on
//! the position of a cell.

use crate::models::station::QUEUE_STATION;
use crate::models::{EventRecord, Occupant, Station, StationStatus};
use crate::utils::time::{elapsed_since, format_clock, format_clock_with_day};
use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq)]
pub struct StationRow {
    pub id: u32,
    pub label: String,
    pub category: &'static str,
    pub status: StationStatus,
    pub occupants: String,
    pub slot: Option<usize>,
}

impl StationRow {
    pub fn bind(station: &Station, on_station: &[&Occupant], slot: Option<usize>) -> Self {
        Self {
            id: station.id,
            label: station.display_name(),
            category: station.category.as_str(),
            status: station.status,
            occupants: bind_occupant_names(on_station),
            slot,
        }
    }
}

fn bind_occupant_names(on_station: &[&Occupant]) -> String {
    if on_station.is_empty() {
        return "-".to_string();
    }
    on_station
        .iter()
        .map(|o| format!("{} ({})", o.name, o.id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Card shown next to an active occupant's marker.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupantRow {
    pub id: String,
    pub station_line: String,
    pub name: String,
    pub id_line: String,
    pub checkin_line: String,
    pub elapsed_line: String,
}

impl OccupantRow {
    pub fn bind(occupant: &Occupant, station: Option<&Station>, now: DateTime<Local>) -> Self {
        Self {
            id: occupant.id.clone(),
            station_line: bind_station_line(occupant, station),
            name: occupant.name.clone(),
            id_line: format!("ID: {}", occupant.id),
            checkin_line: format!("In: {}", format_clock(&occupant.checkin_time)),
            elapsed_line: format!("Up: {}", elapsed_since(occupant.checkin_time, now)),
        }
    }
}

fn bind_station_line(occupant: &Occupant, station: Option<&Station>) -> String {
    if occupant.station_id == QUEUE_STATION {
        return "Queued".to_string();
    }
    match station {
        Some(st) => format!("Station: {}", st.display_name()),
        None => format!("Station: {} (unknown)", occupant.station_id),
    }
}

pub const LOG_HEADERS: [&str; 6] = [
    "User Name",
    "User ID",
    "Station",
    "Checked In",
    "Checked Out",
    "Usage Time",
];

#[derive(Debug, Clone, PartialEq)]
pub struct LogRow {
    pub name: String,
    pub id: String,
    pub station: String,
    pub checked_in: String,
    pub checked_out: String,
    pub usage: String,
}

impl LogRow {
    pub fn bind(rec: &EventRecord) -> Self {
        Self {
            name: rec.occupant_name.clone(),
            id: rec.occupant_id.clone(),
            station: bind_log_station(rec.station_id),
            checked_in: format_clock_with_day(&rec.checkin_time),
            checked_out: rec
                .checkout_time
                .as_ref()
                .map(format_clock_with_day)
                .unwrap_or_else(|| "-".to_string()),
            usage: rec.usage_duration.clone().unwrap_or_default(),
        }
    }

    pub fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.id.clone(),
            self.station.clone(),
            self.checked_in.clone(),
            self.checked_out.clone(),
            self.usage.clone(),
        ]
    }
}

fn bind_log_station(station_id: u32) -> String {
    if station_id == QUEUE_STATION {
        "queue".to_string()
    } else {
        station_id.to_string()
    }
}
