use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{CardSide, Lounge, PlacerConfig, RadialPlacer};
use crate::errors::AppResult;
use crate::models::Size;
use crate::ui::messages::{header, info};
use crate::utils::table::{Column, Table};
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Place {
        width,
        height,
        seed,
    } = cmd
    {
        let canvas = Size::new(
            width.unwrap_or(cfg.canvas_width),
            height.unwrap_or(cfg.canvas_height),
        );
        let placer = match seed {
            Some(s) => RadialPlacer::with_seed(PlacerConfig::default(), canvas, *s),
            None => RadialPlacer::new(PlacerConfig::default(), canvas),
        };
        let lounge = Lounge::open_with(cfg, placer, Local::now());

        header(format!(
            "Radial placement ({:.0}x{:.0})",
            canvas.width, canvas.height
        ));
        if lounge.placer().is_empty() {
            info("No active users to place.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ID", 14),
            Column::new("Name", 24),
            Column::new("X", 8),
            Column::new("Y", 8),
            Column::new("Card", 6),
        ]);
        for occ in lounge.list_active_occupants() {
            let Some(p) = lounge.placer().placement(&occ.id) else {
                continue;
            };
            let card = match p.card {
                CardSide::Right => "right",
                CardSide::Left => "left",
            };
            table.add_row(vec![
                occ.id.clone(),
                occ.name.clone(),
                format!("{:.0}", p.point.x),
                format!("{:.0}", p.point.y),
                card.to_string(),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
