use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Lounge;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Assign { id, station } = cmd {
        let mut lounge = Lounge::open(cfg);
        lounge.assign_queued(id, *station)?;
        success(format!("{} moved from the queue to station {}", id, station));
    }
    Ok(())
}
