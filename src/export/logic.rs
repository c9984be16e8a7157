// src/export/logic.rs

use crate::core::EventLog;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::csv::write_csv;
use crate::export::fs_utils::ensure_writable;
use crate::export::json::write_json;
use crate::export::model::RecordExport;
use crate::export::notify_export_success;
use crate::export::range::days;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::path::Path;

/// Export of one or more daily buckets.
pub struct ExportLogic;

impl ExportLogic {
    /// Collect the records of every bucket in `[start, end]`, in day order.
    pub fn collect(log: &EventLog, start: NaiveDate, end: NaiveDate) -> Vec<RecordExport> {
        days(start, end)
            .into_iter()
            .flat_map(|d| log.read_bucket(d))
            .map(|rec| RecordExport::from(&rec))
            .collect()
    }

    /// Returns the number of exported records.
    pub fn export(
        log: &EventLog,
        format: ExportFormat,
        file: &Path,
        (start, end): (NaiveDate, NaiveDate),
        force: bool,
    ) -> AppResult<usize> {
        ensure_writable(file, force)?;

        let records = Self::collect(log, start, end);
        if records.is_empty() {
            warning("No log records found for the selected range.");
            return Ok(0);
        }

        if let Some(parent) = file.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        match format {
            ExportFormat::Csv => write_csv(file, &records)?,
            ExportFormat::Json => write_json(file, &records)?,
        }

        notify_export_success(format, file, records.len());
        Ok(records.len())
    }
}
