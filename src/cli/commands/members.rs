use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::MemberRoster;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::formatting::truncate_name;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Members { search } = cmd {
        let roster = MemberRoster::load(cfg.member_path());
        let found: Vec<_> = match search {
            Some(q) => roster.search(q),
            None => roster.members().iter().collect(),
        };

        header(format!("Members ({})", roster.path().display()));
        if found.is_empty() {
            info("No matching members.");
            return Ok(());
        }

        let mut table = Table::new(vec![Column::new("Name", 32), Column::new("ID", 16)]);
        for m in &found {
            table.add_row(vec![truncate_name(&m.name, 30), m.id.clone()]);
        }
        print!("{}", table.render());
        println!("\n{} of {} members", found.len(), roster.members().len());
    }
    Ok(())
}
