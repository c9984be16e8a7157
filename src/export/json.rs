use super::model::RecordExport;
use crate::errors::AppResult;
use std::path::Path;

/// Scrive i record in JSON formattato.
pub(crate) fn write_json(path: &Path, records: &[RecordExport]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}
