use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Lounge;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_status, colorize_optional};
use crate::utils::table::{Column, Table};
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { queue } = cmd {
        let lounge = Lounge::open(cfg);

        if !*queue {
            print_stations(&lounge);
            println!();
        }
        print_occupants(&lounge, *queue);
    }
    Ok(())
}

fn print_stations(lounge: &Lounge) {
    header("Stations");

    let mut table = Table::new(vec![
        Column::new("Station", 10),
        Column::new("Type", 10),
        Column::new("Status", 10),
        Column::new("Slot", 5),
        Column::new("Occupants", 40),
    ]);

    for row in lounge.station_rows() {
        let status = format!(
            "{}{}{}",
            color_for_status(row.status),
            row.status.as_str(),
            RESET
        );
        let slot = row.slot.map(|s| s.to_string()).unwrap_or_else(|| "-".into());
        table.add_row(vec![
            row.label,
            row.category.to_string(),
            status,
            colorize_optional(&slot),
            colorize_optional(&row.occupants),
        ]);
    }
    print!("{}", table.render());
}

fn print_occupants(lounge: &Lounge, queued_only: bool) {
    header(if queued_only { "Queue" } else { "Active users" });

    let rows: Vec<_> = lounge
        .occupant_rows(Local::now())
        .into_iter()
        .filter(|r| !queued_only || r.station_line == "Queued")
        .collect();

    if rows.is_empty() {
        info(if queued_only {
            "Nobody is waiting in the queue."
        } else {
            "No active users."
        });
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID", 14),
        Column::new("Name", 24),
        Column::new("Where", 18),
        Column::new("In", 10),
        Column::new("Up", 10),
    ]);
    for row in rows {
        table.add_row(vec![
            row.id,
            row.name,
            row.station_line,
            row.checkin_line.trim_start_matches("In: ").to_string(),
            row.elapsed_line.trim_start_matches("Up: ").to_string(),
        ]);
    }
    print!("{}", table.render());
}
