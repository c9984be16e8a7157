//! Whole-file JSON persistence shared by the ledger, the layout and the event log.

pub mod json;

pub use json::{ensure_dir, read_json, write_json};
