use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::EventLog;
use crate::errors::{AppError, AppResult};
use crate::export::{ExportLogic, parse_range};
use crate::utils::date::{parse_date, today};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        date,
        range,
        force,
    } = cmd
    {
        let days = match (range, date) {
            (Some(r), _) => parse_range(r)?,
            (None, Some(d)) => {
                let day = parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?;
                (day, day)
            }
            (None, None) => (today(), today()),
        };

        let log = EventLog::new(cfg.log_dir());
        ExportLogic::export(&log, *format, Path::new(file), days, *force)?;
    }
    Ok(())
}
