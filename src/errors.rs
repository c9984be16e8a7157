//! Unified application error type.
//! All modules (store, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Input validation
    // ---------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Occupancy conflicts
    // ---------------------------
    #[error("occupant ID {id} ({name}) already checked in on station {station_id}")]
    DuplicateOccupant {
        id: String,
        name: String,
        station_id: u32,
    },

    #[error("station {station_id} is busy (occupied by {holder})")]
    StationBusy { station_id: u32, holder: String },

    #[error("station ID {0} does not exist")]
    UnknownStation(u32),

    #[error("occupant ID {0} not found")]
    NotFound(String),

    #[error("occupant {id} already on station {station_id}")]
    AlreadyAssigned { id: String, station_id: u32 },

    // ---------------------------
    // Layout
    // ---------------------------
    #[error("Invalid slot index: {0}")]
    InvalidSlot(usize),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
