use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Lounge;
use crate::errors::{AppError, AppResult};
use crate::models::Point;
use crate::ui::messages::{header, info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Layout {
        print,
        swap,
        drop_at,
    } = cmd
    {
        let mut lounge = Lounge::open(cfg);

        if let Some(args) = swap {
            let (station, slot) = (station_arg(&args[0])?, parse_arg::<usize>(&args[1], "slot")?);
            if lounge.layout_mut().swap(station, slot)? {
                success(format!("Station {} moved to slot {}", station, slot));
            } else {
                info(format!("Station {} already sits in slot {}", station, slot));
            }
        }

        if let Some(args) = drop_at {
            let station = station_arg(&args[0])?;
            let x = parse_arg::<f32>(&args[1], "x")?;
            let y = parse_arg::<f32>(&args[2], "y")?;
            if lounge.swap_slot(station, Point::new(x, y))? {
                let slot = lounge.layout().slot_of(station).unwrap_or_default();
                success(format!("Station {} dropped into slot {}", station, slot));
            } else {
                info(format!("Station {} stays in its slot", station));
            }
        }

        if *print || (swap.is_none() && drop_at.is_none()) {
            print_layout(&lounge);
        }
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(raw: &str, what: &str) -> AppResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::InvalidInput(format!("invalid {} '{}'", what, raw)))
}

fn station_arg(raw: &str) -> AppResult<u32> {
    parse_arg::<u32>(raw, "station ID")
}

fn print_layout(lounge: &Lounge) {
    header("Station layout");

    let mut mapping = lounge.layout().mapping();
    mapping.sort_by_key(|(_, slot)| *slot);

    let mut table = Table::new(vec![
        Column::new("Slot", 6),
        Column::new("Station", 10),
        Column::new("X", 8),
        Column::new("Y", 8),
    ]);
    for (station_id, slot) in mapping {
        let label = lounge
            .ledger()
            .station(station_id)
            .map(|s| s.display_name())
            .unwrap_or_else(|| station_id.to_string());
        let (x, y) = lounge
            .layout()
            .slot_position(slot)
            .map(|p| (format!("{:.0}", p.x), format!("{:.0}", p.y)))
            .unwrap_or_else(|| ("-".into(), "-".into()));
        table.add_row(vec![slot.to_string(), label, x, y]);
    }
    print!("{}", table.render());
}
