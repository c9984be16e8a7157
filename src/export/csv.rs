use super::model::{RecordExport, get_headers, record_to_row};
use crate::errors::AppResult;
use csv::Writer;
use std::path::Path;

/// Scrive i record in CSV nel file indicato.
pub(crate) fn write_csv(path: &Path, records: &[RecordExport]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(get_headers())?;
    for r in records {
        wtr.write_record(record_to_row(r))?;
    }

    wtr.flush()?;
    Ok(())
}
