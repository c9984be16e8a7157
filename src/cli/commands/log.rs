use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::EventLog;
use crate::core::views::{LOG_HEADERS, LogRow};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info};
use crate::utils::colors::colorize_optional;
use crate::utils::date::{parse_date, today};
use crate::utils::table::{Column, Table};
use ansi_term::Colour;

/// Colore della colonna stazione: coda in giallo, chiusi in verde, aperti in ciano.
fn color_for_row(row: &LogRow) -> Colour {
    if row.station == "queue" {
        Colour::Yellow
    } else if row.checked_out == "-" {
        Colour::Cyan
    } else {
        Colour::Green
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { date } = cmd {
        let day = match date {
            Some(d) => parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => today(),
        };

        let log = EventLog::new(cfg.log_dir());
        let rows: Vec<LogRow> = log.read_bucket(day).iter().map(LogRow::bind).collect();

        header(format!("Lounge log {}", day));
        if rows.is_empty() {
            info(format!("No log records for {}.", day));
            return Ok(());
        }

        let widths = [24, 14, 8, 20, 20, 10];
        let mut table = Table::new(
            LOG_HEADERS
                .iter()
                .zip(widths)
                .map(|(h, w)| Column::new(h, w))
                .collect(),
        );

        for row in &rows {
            let mut cells = row.cells();
            cells[2] = color_for_row(row).paint(cells[2].as_str()).to_string();
            cells[4] = colorize_optional(&cells[4]);
            table.add_row(cells);
        }
        print!("{}", table.render());

        let open = rows.iter().filter(|r| r.checked_out == "-").count();
        println!("\n{} records, {} still open", rows.len(), open);
    }

    Ok(())
}
