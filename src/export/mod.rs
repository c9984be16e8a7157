// src/export/mod.rs

mod csv;
mod fs_utils;
mod json;
pub mod logic;
mod model;
mod range;

pub use logic::ExportLogic;
pub use model::RecordExport;
pub use range::parse_range;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }
}

pub(crate) fn notify_export_success(format: ExportFormat, path: &Path, rows: usize) {
    success(format!(
        "{} export completed: {} ({rows} records)",
        format.label(),
        path.display()
    ));
}
