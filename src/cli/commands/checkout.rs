use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Lounge;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::elapsed_since;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkout { id } = cmd {
        let mut lounge = Lounge::open(cfg);
        let now = Local::now();

        let before = lounge.ledger().occupant(id).cloned();
        lounge.check_out_at(id, now)?;

        if let Some(occ) = before {
            success(format!(
                "{} ({}) checked out after {}",
                occ.name,
                occ.id,
                elapsed_since(occ.checkin_time, now)
            ));
        }
    }
    Ok(())
}
