use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Lounge;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Unqueue { id } = cmd {
        let mut lounge = Lounge::open(cfg);
        lounge.remove_queued(id)?;
        success(format!("{} removed from the queue", id));
    }
    Ok(())
}
