// src/export/model.rs

use crate::models::EventRecord;
use serde::Serialize;

/// Flat row used by every export format.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RecordExport {
    pub date: String,
    pub occupant_name: String,
    pub occupant_id: String,
    pub station_id: u32,
    pub checkin_time: String,
    pub checkout_time: String,
    pub usage_duration: String,
}

impl From<&EventRecord> for RecordExport {
    fn from(rec: &EventRecord) -> Self {
        Self {
            date: rec.checkin_time.format("%Y-%m-%d").to_string(),
            occupant_name: rec.occupant_name.clone(),
            occupant_id: rec.occupant_id.clone(),
            station_id: rec.station_id,
            checkin_time: rec.checkin_time.to_rfc3339(),
            checkout_time: rec
                .checkout_time
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            usage_duration: rec.usage_duration.clone().unwrap_or_default(),
        }
    }
}

pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "date",
        "occupant_name",
        "occupant_id",
        "station_id",
        "checkin_time",
        "checkout_time",
        "usage_duration",
    ]
}

pub(crate) fn record_to_row(r: &RecordExport) -> Vec<String> {
    vec![
        r.date.clone(),
        r.occupant_name.clone(),
        r.occupant_id.clone(),
        r.station_id.to_string(),
        r.checkin_time.clone(),
        r.checkout_time.clone(),
        r.usage_duration.clone(),
    ]
}
