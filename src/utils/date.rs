use chrono::{Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Bucket key used in daily log file names.
pub fn bucket_key(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}
